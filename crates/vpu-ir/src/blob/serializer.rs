//! Append-only byte sink used by stage encoders.

/// Values that can be appended to a blob.
pub trait BlobWritable {
    fn write_le(&self, out: &mut Vec<u8>);
}

macro_rules! impl_blob_writable {
    ($($ty:ty),*) => {
        $(
            impl BlobWritable for $ty {
                fn write_le(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_blob_writable!(u8, i8, u16, i16, u32, i32, u64, i64, f32);

/// Append-only serializer. There is no seeking: what is written stays where it is.
#[derive(Debug, Default, Clone)]
pub struct BlobSerializer {
    buf: Vec<u8>,
}

impl BlobSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value in little-endian order.
    pub fn append<T: BlobWritable>(&mut self, value: T) {
        value.write_le(&mut self.buf);
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
