//! Repository modules implementing the content capability traits.

pub mod content;
