#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Nesting limit used when [`ReadOptions`](crate::ReadOptions) is not customised.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Buffer size used around compression transforms by default.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;
