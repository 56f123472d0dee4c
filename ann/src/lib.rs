pub mod exponential;
pub mod layer;
pub mod log_softmax;

pub use exponential::{fast_exp_neg, ExactNegExp, FastNegExp, NegExp};
pub use layer::Layer;
pub use log_softmax::LogSoftmax;
