mod pacer;
mod reader;
mod scanner;

pub use pacer::ThreadPacer;
pub use reader::FsImageReader;
pub use scanner::WalkdirImageScanner;
