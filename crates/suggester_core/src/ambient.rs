//! Decorative particle animation for the canvas region.
//!
//! The animator is a simulation over host-supplied time: the host calls
//! [`AmbientAnimator::advance_to`] with the elapsed time since start, which
//! spawns one particle per interval and retires particles whose transition has
//! finished. Particles never interact, so each frame is a pure function of the
//! particle's spawn parameters and the current time.

use std::time::Duration;

use rand::Rng;

use crate::dom::{format_number, Element};

pub const SPAWN_INTERVAL: Duration = Duration::from_millis(200);
pub const PARTICLE_LIFETIME: Duration = Duration::from_millis(3000);
pub const MIN_SIZE_FACTOR: f64 = 0.5;
pub const BASE_SIZE_PX: f64 = 45.0;
pub const SPAWN_OFFSET_PX: f64 = 20.0;
pub const RISE_PX: f64 = 200.0;
pub const OPACITY_SCALE: f64 = 0.5;
pub const ROTATION_ADVANCE_DEG: f64 = 90.0;
pub const PARTICLE_ASSET: &str = "/static/img/arrow.svg";
pub const CANVAS_ID: &str = "canvas";
pub const PARTICLE_CLASS: &str = "image-container";

pub type ParticleId = u64;

/// Canvas size, read once when the animator starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimatorSettings {
    pub spawn_interval: Duration,
    pub lifetime: Duration,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            lifetime: PARTICLE_LIFETIME,
        }
    }
}

/// Spawn parameters of one particle. Frames are derived from these.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub spawned_at: Duration,
    pub size_factor: f64,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub opacity: f64,
}

/// Interpolated appearance of a particle at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub left: f64,
    pub top: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub size_px: f64,
}

impl Particle {
    pub fn spawn<R: Rng>(
        id: ParticleId,
        spawned_at: Duration,
        bounds: CanvasBounds,
        rng: &mut R,
    ) -> Self {
        let size_factor = rng.random::<f64>().max(MIN_SIZE_FACTOR);
        let x = bounds.width * rng.random::<f64>();
        let y = bounds.height + SPAWN_OFFSET_PX;
        let rotation = rng.random::<f64>() * 360.0;
        Self {
            id,
            spawned_at,
            size_factor,
            x,
            y,
            rotation,
            opacity: OPACITY_SCALE * size_factor,
        }
    }

    pub fn expires_at(&self, lifetime: Duration) -> Duration {
        self.spawned_at + lifetime
    }

    pub fn frame(&self, now: Duration, lifetime: Duration) -> ParticleFrame {
        let progress = if lifetime.is_zero() {
            1.0
        } else {
            now.saturating_sub(self.spawned_at).as_secs_f64() / lifetime.as_secs_f64()
        };
        let t = ease_cubic_in_out(progress.clamp(0.0, 1.0));
        ParticleFrame {
            left: self.x,
            top: self.y - RISE_PX * self.size_factor * t,
            rotation: self.rotation + ROTATION_ADVANCE_DEG * t,
            opacity: self.opacity * (1.0 - t),
            size_px: BASE_SIZE_PX * self.size_factor,
        }
    }

    fn render(&self, now: Duration, lifetime: Duration) -> Element {
        let frame = self.frame(now, lifetime);
        let size = format_number(frame.size_px);
        Element::new("img")
            .with_class(PARTICLE_CLASS)
            .with_attr("src", PARTICLE_ASSET)
            .with_attr("width", size.clone())
            .with_attr("height", size)
            .with_style("transform", format!("rotate({}deg)", format_number(frame.rotation)))
            .with_style("opacity", format_number(frame.opacity))
            .with_style("top", format!("{}px", format_number(frame.top)))
            .with_style("left", format!("{}px", format_number(frame.left)))
    }
}

/// Cubic in-out easing over [0, 1].
fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceReport {
    pub spawned: usize,
    pub retired: usize,
}

#[derive(Debug, Clone)]
pub struct AmbientAnimator {
    bounds: CanvasBounds,
    settings: AnimatorSettings,
    particles: Vec<Particle>,
    next_spawn_at: Duration,
    next_id: ParticleId,
    now: Duration,
}

impl AmbientAnimator {
    pub fn start(bounds: CanvasBounds) -> Self {
        Self::with_settings(bounds, AnimatorSettings::default())
    }

    pub fn with_settings(bounds: CanvasBounds, settings: AnimatorSettings) -> Self {
        let settings = AnimatorSettings {
            spawn_interval: settings.spawn_interval.max(Duration::from_millis(1)),
            ..settings
        };
        Self {
            bounds,
            settings,
            particles: Vec::new(),
            next_spawn_at: settings.spawn_interval,
            next_id: 1,
            now: Duration::ZERO,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Moves the clock to `now` (time since start). Spawns every particle
    /// whose tick falls in the elapsed span, then removes finished ones.
    /// Going backwards is a no-op.
    pub fn advance_to<R: Rng>(&mut self, now: Duration, rng: &mut R) -> AdvanceReport {
        if now < self.now {
            return AdvanceReport::default();
        }
        self.now = now;

        let mut report = AdvanceReport::default();
        while self.next_spawn_at <= now {
            let particle = Particle::spawn(self.next_id, self.next_spawn_at, self.bounds, rng);
            self.next_id += 1;
            self.particles.push(particle);
            self.next_spawn_at += self.settings.spawn_interval;
            report.spawned += 1;
        }

        let lifetime = self.settings.lifetime;
        let before = self.particles.len();
        self.particles.retain(|p| p.expires_at(lifetime) > now);
        report.retired = before - self.particles.len();
        report
    }

    /// The canvas element with one image per live particle at the current time.
    pub fn render_canvas(&self) -> Element {
        Element::new("div").with_id(CANVAS_ID).with_children(
            self.particles
                .iter()
                .map(|p| p.render(self.now, self.settings.lifetime)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ease_cubic_in_out;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }
}
