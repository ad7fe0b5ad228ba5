// Particle record plus the free functions that advance and draw it

use crate::color::Color;
use crate::pointer::Pointer;
use crate::renderer::Surface;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub color: Color,
    pub opacity: f64,
    pub pulse_phase: f64,
    pub pulse_speed: f64,
}

impl Particle {
    pub const MIN_SIZE: f64 = 1.5;
    pub const SIZE_RANGE: f64 = 2.0;
    pub const SPEED_RANGE: f64 = 0.5;
    pub const MIN_PULSE_SPEED: f64 = 0.005;
    pub const PULSE_SPEED_RANGE: f64 = 0.015;
    pub const BASE_OPACITY: f64 = 0.4;
    pub const PULSE_AMPLITUDE: f64 = 0.15;
    // Discs are drawn a little fainter than their pulse value
    pub const DRAW_ALPHA_SCALE: f64 = 0.7;

    // Random particle somewhere inside a width x height canvas
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Particle {
        let pos = [rng.gen::<f64>() * width, rng.gen::<f64>() * height];
        let size = rng.gen::<f64>() * Particle::SIZE_RANGE + Particle::MIN_SIZE;
        let vel = [
            (rng.gen::<f64>() - 0.5) * Particle::SPEED_RANGE,
            (rng.gen::<f64>() - 0.5) * Particle::SPEED_RANGE,
        ];
        let color = *Color::PALETTE
            .choose(rng)
            .unwrap_or(&Color::PALETTE[0]);
        let pulse_speed =
            rng.gen::<f64>() * Particle::PULSE_SPEED_RANGE + Particle::MIN_PULSE_SPEED;
        let pulse_phase = rng.gen::<f64>() * PI * 2.0;

        Particle {
            pos,
            vel,
            size,
            color,
            opacity: 0.5,
            pulse_phase,
            pulse_speed,
        }
    }
}

// One simulation step: drift, pulse, bounce off the edges, then get
// shoved by the pointer. The shove moves position directly, velocity is
// left alone.
pub fn update(p: &mut Particle, width: f64, height: f64, pointer: Option<&Pointer>) {
    p.pos[0] += p.vel[0];
    p.pos[1] += p.vel[1];

    p.pulse_phase += p.pulse_speed;
    p.opacity = Particle::BASE_OPACITY + p.pulse_phase.sin() * Particle::PULSE_AMPLITUDE;

    if p.pos[0] > width || p.pos[0] < 0.0 {
        p.vel[0] = -p.vel[0];
    }
    if p.pos[1] > height || p.pos[1] < 0.0 {
        p.vel[1] = -p.vel[1];
    }

    if let Some(push) = pointer.and_then(|pointer| pointer.push_at(p.pos)) {
        p.pos[0] += push[0];
        p.pos[1] += push[1];
    }
}

pub fn draw<S: Surface + ?Sized>(p: &Particle, surface: &mut S) {
    surface.fill_disc(p.pos, p.size, p.color, p.opacity * Particle::DRAW_ALPHA_SCALE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            pos: [x, y],
            vel: [0.0, 0.0],
            size: 2.0,
            color: Color::PALETTE[0],
            opacity: 0.5,
            pulse_phase: 0.0,
            pulse_speed: 0.01,
        }
    }

    #[test]
    fn spawn_stays_in_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, 320.0, 240.0);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 320.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 240.0);
            assert!(p.size >= 1.5 && p.size < 3.5);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(p.pulse_speed >= 0.005 && p.pulse_speed < 0.02);
            assert!(p.pulse_phase >= 0.0 && p.pulse_phase < 2.0 * PI);
            assert!(Color::PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn moves_by_velocity() {
        let mut p = still(10.0, 10.0);
        p.vel = [0.2, -0.1];
        update(&mut p, 100.0, 100.0, None);
        assert!((p.pos[0] - 10.2).abs() < 1e-12);
        assert!((p.pos[1] - 9.9).abs() < 1e-12);
        assert_eq!(p.vel, [0.2, -0.1]);
    }

    #[test]
    fn opacity_follows_pulse() {
        let mut p = still(10.0, 10.0);
        p.pulse_phase = PI / 2.0 - p.pulse_speed;
        update(&mut p, 100.0, 100.0, None);
        assert!((p.opacity - 0.55).abs() < 1e-9);

        for _ in 0..2000 {
            update(&mut p, 100.0, 100.0, None);
            assert!(p.opacity >= 0.25 - 1e-12 && p.opacity <= 0.55 + 1e-12);
        }
    }

    #[test]
    fn reflects_on_each_edge() {
        let mut right = still(99.9, 50.0);
        right.vel = [0.2, 0.0];
        update(&mut right, 100.0, 100.0, None);
        assert!(right.pos[0] > 100.0, "one frame overshoot is kept");
        assert_eq!(right.vel[0], -0.2);

        let mut top = still(50.0, 0.1);
        top.vel = [0.0, -0.2];
        update(&mut top, 100.0, 100.0, None);
        assert_eq!(top.vel[1], 0.2);

        let mut inside = still(50.0, 50.0);
        inside.vel = [0.1, 0.1];
        update(&mut inside, 100.0, 100.0, None);
        assert_eq!(inside.vel, [0.1, 0.1]);
    }

    #[test]
    fn pointer_shoves_position_not_velocity() {
        let pointer = Pointer::new(50.0, 50.0);
        let mut p = still(60.0, 50.0);
        p.vel = [0.0, 0.0];
        update(&mut p, 200.0, 200.0, Some(&pointer));
        assert!(p.pos[0] > 60.0);
        assert_eq!(p.vel, [0.0, 0.0]);

        let mut far = still(190.0, 190.0);
        update(&mut far, 200.0, 200.0, Some(&pointer));
        assert_eq!(far.pos, [190.0, 190.0]);
    }
}
