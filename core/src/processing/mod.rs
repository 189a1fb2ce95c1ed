pub mod locator;

pub use locator::TargetLocator;
