#[path = "../../growordie-game/tests/scenarios.rs"]
mod scenarios;

#[path = "../../growordie-game/tests/seed_sweep.rs"]
mod seed_sweep;
