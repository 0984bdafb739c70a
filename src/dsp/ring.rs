/// Fixed-capacity circular buffer with a variable active length.
///
/// Storage is allocated once at construction; `set_len` only moves the wrap
/// point, so retuning a string never allocates. Indices passed to `get` are
/// relative to the oldest sample and are wrapped into the active length.
pub struct RingBuffer {
    buffer: Vec<f32>,
    len: usize,
    read_pos: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: vec![0.0; capacity],
            len: capacity,
            read_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the active length (clamped to 1..=capacity) and rewind to the start.
    pub fn set_len(&mut self, len: usize) -> usize {
        self.len = len.clamp(1, self.buffer.len());
        self.read_pos = 0;
        self.len
    }

    /// Active region, oldest sample first after a rewind.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.buffer[..self.len]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer[..self.len]
    }

    /// Sample `offset` places after the oldest one.
    #[inline]
    pub fn get(&self, offset: usize) -> f32 {
        self.buffer[(self.read_pos + offset) % self.len]
    }

    /// Oldest sample.
    #[inline]
    pub fn front(&self) -> f32 {
        self.buffer[self.read_pos]
    }

    /// Overwrite the oldest sample with `sample` (making it the newest) and
    /// advance. Returns true when the cursor wrapped back to the start.
    #[inline]
    pub fn rotate(&mut self, sample: f32) -> bool {
        self.buffer[self.read_pos] = sample;
        self.read_pos += 1;
        if self.read_pos >= self.len {
            self.read_pos = 0;
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> usize {
        self.read_pos
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.read_pos = 0;
    }
}
