//! Dynamic GPU buffer management with automatic resizing
//!
//! Point attribute buffers are rewritten whenever the particle count
//! changes. Buffers grow 2x when data exceeds capacity and never shrink.

use wgpu::util::DeviceExt;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 64;

/// Byte capacity to grow to when `needed` bytes no longer fit in `current`,
/// never past `limit` unless `needed` itself is larger.
fn grown_capacity(needed: usize, current: usize, limit: usize) -> usize {
    needed
        .saturating_mul(2)
        .max(current + 1024)
        .min(limit)
        .max(needed)
}

/// A GPU buffer that can grow dynamically
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer initialized from existing data.
    pub fn new_with_data<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let capacity = data_bytes.len().max(MIN_CAPACITY);

        // Pad the initial contents so the allocation matches `capacity`.
        let mut contents = data_bytes.to_vec();
        contents.resize(capacity, 0);

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: &contents,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            buffer,
            capacity,
            len: data_bytes.len(),
            usage,
            label: label.to_owned(),
        }
    }

    /// Write data to buffer, growing if necessary
    ///
    /// Returns `true` if buffer was reallocated
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        let reallocated = if needed > self.capacity {
            let limit = usize::try_from(device.limits().max_buffer_size)
                .unwrap_or(usize::MAX);
            let new_capacity = grown_capacity(needed, self.capacity, limit);
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }
        self.len = needed;

        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes currently written.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no bytes are written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Typed wrapper for DynamicBuffer with cleaner API
///
/// Tracks item count rather than byte length.
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Typed buffer initialized from existing data.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new_with_data(device, label, data, usage),
            count: data.len(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Write data to buffer, growing if necessary
    ///
    /// Returns `true` if buffer was reallocated
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner.write(device, queue, data)
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Number of items currently written.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether no items are written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated capacity in items.
    pub fn capacity(&self) -> usize {
        self.inner.capacity() / size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_LIMIT: usize = usize::MAX;

    #[test]
    fn growth_at_least_doubles_request() {
        assert_eq!(grown_capacity(10_000, 64, NO_LIMIT), 20_000);
    }

    #[test]
    fn growth_adds_at_least_one_kilobyte() {
        assert_eq!(grown_capacity(100, 64, NO_LIMIT), 64 + 1024);
    }

    #[test]
    fn growth_stops_at_device_limit() {
        let limit = wgpu::Limits::default().max_buffer_size as usize;
        let needed = 12_000_000 * size_of::<[f32; 3]>();
        assert!(needed < limit);
        assert_eq!(grown_capacity(needed, MIN_CAPACITY, limit), limit);
    }

    #[test]
    fn growth_never_undercuts_request() {
        assert_eq!(grown_capacity(5_000, 64, 4_096), 5_000);
    }

    #[test]
    fn twenty_thousand_positions_fit_after_one_growth() {
        let needed = 20_000 * size_of::<[f32; 3]>();
        assert!(grown_capacity(needed, MIN_CAPACITY, NO_LIMIT) >= needed);
    }
}
