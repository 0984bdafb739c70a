/*
Tone Shaping
============

Two one-pole low-passes colour the summed string bus:

  Brightness / presence
    lp        = lp + alpha_lp × (x − lp)          slow-ish low-pass
    presence  = x + presence_mix × (x − lp)       add back what lp removed

    (x − lp) is the high-frequency part of the signal, so adding a fraction of
    it emphasises pick attack and string zing.

  Body
    body      = body + alpha_body × (presence − body)
    shaped    = presence + body_mix × (body − presence)

    alpha_body is small (0.02), so `body` only follows the low end. Mixing
    toward it thickens the sound like a guitar body would.

The filter memory belongs to the bus, not to individual strings.
*/

/// Brightness, presence and body colouring for the summed string output.
#[derive(Debug, Clone)]
pub struct ToneShaper {
    lp: f32,
    body: f32,
    lp_alpha: f32,
    presence_mix: f32,
    body_alpha: f32,
    body_mix: f32,
}

impl ToneShaper {
    pub fn new(lp_alpha: f32, presence_mix: f32, body_alpha: f32, body_mix: f32) -> Self {
        Self {
            lp: 0.0,
            body: 0.0,
            lp_alpha,
            presence_mix,
            body_alpha,
            body_mix,
        }
    }

    #[inline]
    pub fn process(&mut self, x: f32) -> f32 {
        self.lp += self.lp_alpha * (x - self.lp);
        let presence = x + self.presence_mix * (x - self.lp);

        self.body += self.body_alpha * (presence - self.body);
        presence + self.body_mix * (self.body - presence)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.lp = 0.0;
        self.body = 0.0;
    }

    /// Current (lowpass, body) filter memory.
    pub fn state(&self) -> (f32, f32) {
        (self.lp, self.body)
    }
}
