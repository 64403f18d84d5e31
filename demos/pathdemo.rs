//! Terminal path demo: batches of background path jobs over a random
//! world, then a step-by-step replay of one search.
//!
//! Run: cargo run --bin pathdemo [seed]

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use waypath_core::{Coord, Extent};
use waypath_demos::{AsciiCanvas, DEPTH, WALKABLE_RATIO, WIDTH, random_floor, random_world};
use waypath_jobs::{PathRequest, PathScheduler, SchedulerConfig};
use waypath_search::{
    Algorithm, DiagonalPolicy, PathResult, SearchGrid, SearchOptions, SearchTraceRecorder,
    find_path,
};

const JOBS: usize = 64;
const REPLAY_STEPS: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 42,
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let world = random_world(&mut rng, Extent::new(WIDTH, 1, DEPTH), WALKABLE_RATIO);
    let Some(start) = random_floor(&mut rng, &world) else {
        return Err("world has no walkable cell".into());
    };

    // Background jobs: half A*, half JPS, all from the same start.
    let mut scheduler = PathScheduler::new(SchedulerConfig::default().with_max_concurrent_jobs(8))?;
    let results: Rc<RefCell<Vec<(Coord, PathResult)>>> = Rc::default();
    for i in 0..JOBS {
        let Some(target) = random_floor(&mut rng, &world) else {
            break;
        };
        let request = PathRequest::new(start, target)
            .with_diagonal(DiagonalPolicy::IfAtMostOneObstacle)
            .with_jump_search(i % 2 == 1);
        let sink = Rc::clone(&results);
        scheduler.request_path(&world, request, move |res| sink.borrow_mut().push((target, res)));
    }

    let mut ticks = 0;
    while !scheduler.is_idle() {
        let report = scheduler.tick();
        ticks += 1;
        if report.completed == 0 && report.admitted == 0 {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
    }

    let results = results.borrow();
    let found = results.iter().filter(|(_, r)| r.is_found()).count();
    println!(
        "{} jobs finished in {ticks} ticks: {found} found, {} unreachable",
        results.len(),
        results.len() - found
    );

    // Show the longest path that was found.
    if let Some((target, best)) = results
        .iter()
        .filter(|(_, r)| r.is_found())
        .max_by(|a, b| a.1.cost.total_cmp(&b.1.cost))
    {
        let mut canvas = AsciiCanvas::new(&world);
        canvas.draw_path(start, best);
        println!(
            "\n{start} -> {target}: cost {}, {} waypoints\n{}",
            best.cost,
            best.waypoints.len(),
            canvas.render()
        );

        // Replay the same search in JPS mode.
        let jps = find_path(
            SearchGrid::build(&world),
            start,
            *target,
            SearchOptions::default()
                .with_algorithm(Algorithm::JumpPoint)
                .with_trace(true),
        );
        println!("jump point search: cost {}, {} waypoints", jps.cost, jps.waypoints.len());

        if let Some(trace) = jps.trace {
            let mut recorder = SearchTraceRecorder::new();
            recorder.load(trace);
            let total = recorder.len();
            let mut canvas = AsciiCanvas::new(&world);
            for step in 0..REPLAY_STEPS.min(total) {
                if recorder.advance_on(&mut canvas).is_none() {
                    break;
                }
                println!("\nstep {}/{total}\n{}", step + 1, canvas.render());
            }
        }
    }

    Ok(())
}
