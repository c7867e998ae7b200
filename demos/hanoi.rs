//! Tower of Hanoi initial states, encoded as SDDs.
//!
//! Builds the diagrams for the initial configurations of a three-disk puzzle
//! (one variable per disk, valued by the tower it sits on), unites them, and
//! prints the shared structure as Graphviz DOT.

use log::info;
use sdd_rs::manager::SddManager;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let mgr = SddManager::<u32>::new();

    // One disk on tower 0.
    let x0 = mgr.node(1, mgr.values([0u32]), &mgr.one()).unwrap();

    // Three disks, all on tower 0 / all on tower 1.
    let y0 = {
        let mid = mgr.node(2, mgr.values([0u32]), &x0).unwrap();
        mgr.node(3, mgr.values([0u32]), &mid).unwrap()
    };
    let z0 = {
        let mid = mgr.node(2, mgr.values([1u32]), &x0).unwrap();
        mgr.node(3, mgr.values([1u32]), &mid).unwrap()
    };

    info!("x0 encodes {} state(s)", mgr.count_paths(&x0));

    let both = mgr.union(&[y0, z0]).unwrap();
    info!("y0 ∪ z0 encodes {} state(s)", mgr.count_paths(&both));
    for state in mgr.paths(&both) {
        info!("  state: {:?}", state);
    }
    info!("{} node(s) in the union", mgr.node_count(&both));
    info!("manager: {:?}", mgr.statistics());

    println!("{}", mgr.to_dot(&both));
}
