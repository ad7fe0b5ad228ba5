// The particle field: owns every particle and the pointer, steps the
// simulation and renders it. Nothing in here touches the DOM.

use crate::color::Color;
use crate::particle::{self, Particle};
use crate::pointer::Pointer;
use crate::renderer::Surface;
use rand::Rng;

/// A line to draw between two particles that are close enough.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub opacity: f64,
}

pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<Pointer>,
}

impl ParticleField {
    pub const AREA_PER_PARTICLE: f64 = 10_000.0;
    pub const CONNECTION_DISTANCE: f64 = 180.0;
    pub const CONNECTION_MAX_OPACITY: f64 = 0.55;

    pub fn new() -> ParticleField {
        ParticleField {
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
        }
    }

    pub fn particle_count_for(width: f64, height: f64) -> usize {
        if width <= 0.0 || height <= 0.0 {
            return 0;
        }
        (width * height / ParticleField::AREA_PER_PARTICLE).floor() as usize
    }

    /// Throws every particle away and spawns a fresh batch sized to the
    /// new area. The pointer is kept.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let count = ParticleField::particle_count_for(self.width, self.height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(rng, self.width, self.height));
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn pointer(&self) -> Option<&Pointer> {
        self.pointer.as_ref()
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some(Pointer::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn update(&mut self) {
        let pointer = self.pointer;
        for p in &mut self.particles {
            particle::update(p, self.width, self.height, pointer.as_ref());
        }
    }

    /// Every unordered pair closer than the connection distance, with
    /// opacity fading linearly to zero at that distance.
    pub fn connections(&self) -> Vec<Connection> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(opacity) = connection_opacity(a.pos, b.pos) {
                    links.push(Connection {
                        from: a.pos,
                        to: b.pos,
                        opacity,
                    });
                }
            }
        }
        links
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            particle::draw(p, surface);
        }
        for link in self.connections() {
            surface.stroke_line(link.from, link.to, Color::LINK, link.opacity);
        }
    }

    // One animation frame
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.update();
        self.render(surface);
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        ParticleField::new()
    }
}

pub fn connection_opacity(a: [f64; 2], b: [f64; 2]) -> Option<f64> {
    let distance = vecmath::vec2_len(vecmath::vec2_sub(a, b));
    if distance < ParticleField::CONNECTION_DISTANCE {
        let falloff = 1.0 - distance / ParticleField::CONNECTION_DISTANCE;
        Some(falloff * ParticleField::CONNECTION_MAX_OPACITY)
    } else {
        None
    }
}
