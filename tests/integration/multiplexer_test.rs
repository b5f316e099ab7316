//! Tests for sharing one indicator between concurrent tasks.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vmwaretool::indicator::{
    style, Indicator, IndicatorExt, Multiplexer, NullIndicator, SharedIndicator, StatusIndicator,
    TaskHandle,
};

use crate::helpers::SharedBuffer;

type Job = Box<dyn FnOnce(&TaskHandle) -> Result<u32, String> + Send>;

fn null_mux() -> (SharedBuffer, Arc<Multiplexer>) {
    let out = SharedBuffer::default();
    let indicator: SharedIndicator = Arc::new(NullIndicator::with_writer(Box::new(out.clone())));
    (out, Multiplexer::new(indicator))
}

/// Group the output lines by their `task-N` prefix.
fn lines_by_task(lines: &[String]) -> HashMap<String, Vec<String>> {
    let mut by_task: HashMap<String, Vec<String>> = HashMap::new();
    for line in lines {
        let (task, _) = line.split_once(' ').unwrap();
        by_task.entry(task.to_string()).or_default().push(line.clone());
    }
    by_task
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn exactly_one_task_is_current_while_rotating() {
    let (_out, mux) = null_mux();
    let handles: Vec<_> = (0..3).map(|i| mux.register(format!("vol-{}", i))).collect();

    for _ in 0..7 {
        let current = handles.iter().filter(|h| h.is_current()).count();
        assert_eq!(current, 1);
        mux.rotate().unwrap();
    }
}

#[test]
fn rotation_is_round_robin() {
    let (_out, mux) = null_mux();
    let a = mux.register("a");
    let b = mux.register("b");
    let c = mux.register("c");

    assert_eq!(mux.current(), Some(a.id()));
    assert_eq!(mux.rotate().unwrap(), Some(b.id()));
    assert_eq!(mux.rotate().unwrap(), Some(c.id()));
    assert_eq!(mux.rotate().unwrap(), Some(a.id()));
}

#[test]
fn promoted_task_flushes_backlog_in_order() {
    let (out, mux) = null_mux();
    let first = mux.register("first");
    let second = mux.register("second");

    second.write("second 1").unwrap();
    second.write("second 2").unwrap();
    first.write("first 1").unwrap();
    assert_eq!(out.lines(), ["first 1"]);
    assert_eq!(second.pending(), 2);

    mux.promote(second.id()).unwrap();
    assert_eq!(out.lines(), ["first 1", "second 1", "second 2"]);
    assert_eq!(second.pending(), 0);
    assert!(!first.is_current());
}

#[test]
fn finishing_the_current_task_promotes_the_next() {
    let (out, mux) = null_mux();
    let first = mux.register("first");
    let second = mux.register("second");
    second.write("queued while first ran").unwrap();

    first.complete().unwrap();
    assert_eq!(mux.current(), Some(second.id()));
    assert!(second.is_current());
    assert_eq!(out.lines(), ["queued while first ran"]);
}

#[test]
fn dropped_handle_flushes_and_counts_as_abandoned() {
    let (out, mux) = null_mux();
    let _owner = mux.register("owner");
    {
        let cancelled = mux.register("cancelled");
        cancelled.write("partial progress").unwrap();
    }
    assert_eq!(out.lines(), ["partial progress"]);
    assert_eq!(mux.outcomes(), (0, 1));
    assert_eq!(mux.active(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn concurrent_writers_never_interleave_or_lose_lines() {
    const TASKS: usize = 4;
    const LINES: usize = 50;

    let (out, mux) = null_mux();
    let rotator = mux.rotate_every(Duration::from_millis(1));

    let workers: Vec<_> = (0..TASKS)
        .map(|t| {
            let handle = mux.register(format!("task-{}", t));
            thread::spawn(move || {
                for n in 0..LINES {
                    handle.set_text(format!("step {}", n));
                    handle.write(format!("task-{} line-{}", t, n)).unwrap();
                }
                handle.complete().unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    rotator.stop();

    let lines = out.lines();
    assert_eq!(lines.len(), TASKS * LINES);
    let by_task = lines_by_task(&lines);
    for t in 0..TASKS {
        let expected: Vec<String> = (0..LINES).map(|n| format!("task-{} line-{}", t, n)).collect();
        assert_eq!(by_task[&format!("task-{}", t)], expected);
    }
    assert_eq!(mux.outcomes(), (TASKS, 0));
    assert_eq!(mux.current(), None);
}

#[test]
fn run_all_reports_results_in_job_order() {
    let (out, mux) = null_mux();
    let jobs: Vec<(String, Job)> = vec![
        (
            "vol-a".to_string(),
            Box::new(|task: &TaskHandle| -> Result<u32, String> {
                task.write("vol-a extended").map_err(|e| e.to_string())?;
                Ok(10)
            }) as Job,
        ),
        (
            "vol-b".to_string(),
            Box::new(|task: &TaskHandle| -> Result<u32, String> {
                task.write("vol-b failed").map_err(|e| e.to_string())?;
                Err("no valid datastore".to_string())
            }) as Job,
        ),
        (
            "vol-c".to_string(),
            Box::new(|_: &TaskHandle| -> Result<u32, String> { Ok(30) }) as Job,
        ),
    ];

    let results = mux.run_all(jobs);
    assert_eq!(
        results,
        vec![Ok(10), Err("no valid datastore".to_string()), Ok(30)]
    );
    assert_eq!(mux.outcomes(), (2, 1));

    let mut lines = out.lines();
    lines.sort();
    assert_eq!(lines, ["vol-a extended", "vol-b failed"]);
    assert!(mux.summary().contains("2/3 tasks completed"));
}

// ============================================================================
// Real spinner
// ============================================================================

#[test]
fn status_text_follows_the_current_task() {
    let out = SharedBuffer::default();
    let status = Arc::new(StatusIndicator::with_writer(
        style::lookup("line").unwrap(),
        "starting",
        Box::new(out.clone()),
        None,
    ));
    let shared: SharedIndicator = status.clone();
    let mux = Multiplexer::new(shared);

    let resize = mux.register("vol-1");
    let attach = mux.register("vol-2");
    resize.set_text("resizing");
    attach.set_text("attaching");
    assert_eq!(status.text(), "vol-1: resizing");

    mux.rotate().unwrap();
    assert_eq!(status.text(), "vol-2: attaching");

    attach.write("vol-2 attached").unwrap();
    assert!(out.contents().contains("vol-2 attached\n"));
    assert!(out.contents().ends_with("- vol-2: attaching"));

    drop(resize);
    drop(attach);
    status.stop();
    assert!(status.is_stopped());
}

#[test]
fn coordinator_indicator_can_be_hidden_for_plain_output() {
    let out = SharedBuffer::default();
    let status = Arc::new(StatusIndicator::with_writer(
        style::lookup("line").unwrap(),
        "waiting",
        Box::new(out.clone()),
        None,
    ));
    let shared: SharedIndicator = status.clone();
    let mux = Multiplexer::new(shared);

    {
        let _hidden = mux.indicator().hidden();
        assert!(!status.is_rendering());
        let borrowed: &dyn Indicator = mux.indicator().as_ref();
        borrowed.write("vmware.host_port = 443").unwrap();
    }
    assert!(status.is_rendering());
    assert!(out.contents().contains("vmware.host_port = 443\n"));
    assert!(out.contents().ends_with("- waiting"));
}
