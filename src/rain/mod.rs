pub mod drop;
pub mod rainfall;
pub mod schedule;
pub mod spawner;
