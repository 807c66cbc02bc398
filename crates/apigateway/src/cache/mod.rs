mod memory;
mod redis;

pub use self::memory::MemoryPageCache;
pub use self::redis::RedisPageCache;

pub(crate) fn page_key(path: &str) -> String {
    format!("page:{path}")
}

pub(crate) fn tag_key(tag: &str) -> String {
    format!("tag:{tag}")
}
