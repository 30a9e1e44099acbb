/// Cache line size (64 bytes) for x86_64
pub const CL_SIZE: usize = 64;

/// Machine word size (8 bytes); the region scan reads word-at-a-time
pub const WORD_SIZE: usize = size_of::<u64>();
