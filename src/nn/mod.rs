pub mod init;
pub mod layers;
pub mod module;

pub use module::Module;
