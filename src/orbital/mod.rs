pub mod lagrange;

pub use lagrange::PairGeometry;
