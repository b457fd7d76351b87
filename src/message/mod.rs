//! Message composition.

mod composer;


pub use composer::{MessageComposer, compose};
