mod goal;

pub use goal::{Goal, parse_goal_date};
