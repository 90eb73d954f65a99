mod fold;

pub use fold::ConstantFolder;
