mod index;

pub use index::{EntityIndex, CHUNK_SIZE};
