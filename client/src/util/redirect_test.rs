use super::*;

#[test]
fn new_task_is_live() {
    let task = RedirectTask::schedule(Duration::from_millis(10), || {});
    assert!(!task.is_cancelled());
}

#[test]
fn cancel_marks_task() {
    let task = RedirectTask::schedule(Duration::from_millis(10), || {});
    task.cancel();
    assert!(task.is_cancelled());
}

#[test]
fn drop_cancels_shared_flag() {
    let task = RedirectTask::schedule(Duration::from_millis(10), || {});
    let flag = Rc::clone(&task.cancelled);
    drop(task);
    assert!(flag.get());
}

#[test]
fn callback_never_runs_outside_browser() {
    let fired = Rc::new(Cell::new(false));
    let task = RedirectTask::schedule(Duration::ZERO, {
        let fired = Rc::clone(&fired);
        move || fired.set(true)
    });
    drop(task);
    assert!(!fired.get());
}
