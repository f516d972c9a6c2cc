pub mod chunks;
pub mod error;
pub mod health;
pub mod questions;

pub use chunks::create_chunks;
pub use health::health_handler;
pub use questions::{
    create_multiple_choice, create_single_choice, create_true_or_false,
};
