//! Walk through moving a view between two containers.
//!
//! Run with: cargo run --example reparent
//!
//! Set `SPARK_REMOUNT_LOG=debug` to also see mount and move events.

use spark_remount::{logging, Stage, StageConfig};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init()?;

    let mut stage = Stage::new(StageConfig::default())?;
    println!("child mounted in {}", stage.owner_name().unwrap_or("-"));

    stage.move_to_last()?;
    println!("child moved to {}", stage.owner_name().unwrap_or("-"));

    // The child already left Container 1, so only the container goes
    stage.destroy("Container 1")?;
    println!("after destroying Container 1: {:?}", stage.state());

    stage.destroy("Container 2")?;
    println!("after destroying Container 2: {:?}", stage.state());

    for event in stage.events().events() {
        println!("  {event}");
    }
    Ok(())
}
