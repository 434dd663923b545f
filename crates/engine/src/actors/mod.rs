pub mod boss;
pub mod bullet;
pub mod player;
pub mod powerup;
pub mod runner;
pub mod turret;
