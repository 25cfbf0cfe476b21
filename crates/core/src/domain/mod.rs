pub mod context;
pub mod garment;
pub mod outfit;
