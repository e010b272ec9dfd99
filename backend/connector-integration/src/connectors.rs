pub mod ogone;

pub use self::ogone::Ogone;
