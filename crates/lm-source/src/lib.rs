/// Chargement des images sources, complétées à des dimensions puissances de deux.

pub mod image;

pub use self::image::{PaddedImage, next_power_of_two};
