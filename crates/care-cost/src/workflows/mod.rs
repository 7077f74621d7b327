pub mod cost_planner;
