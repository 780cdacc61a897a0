use super::*;
use std::cell::Cell;

fn counter() -> (Rc<Cell<u32>>, Box<dyn FnMut()>) {
    let hits = Rc::new(Cell::new(0));
    let task_hits = Rc::clone(&hits);
    (hits, Box::new(move || task_hits.set(task_hits.get() + 1)))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn repeating_timer_fires_every_period() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let _handle = scheduler.every(ms(100), task);
    scheduler.advance(ms(99));
    assert_eq!(hits.get(), 0);
    scheduler.advance(ms(1));
    assert_eq!(hits.get(), 1);
    scheduler.advance(ms(350));
    assert_eq!(hits.get(), 4);
    assert_eq!(scheduler.now(), ms(450));
}

#[test]
fn one_shot_fires_once_and_is_released() {
    let scheduler = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let task_hits = Rc::clone(&hits);
    let _handle = scheduler.after(ms(300), Box::new(move || task_hits.set(task_hits.get() + 1)));
    assert_eq!(scheduler.pending(), 1);
    scheduler.advance(ms(1000));
    assert_eq!(hits.get(), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn dropping_handle_cancels() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let handle = scheduler.every(ms(100), task);
    scheduler.advance(ms(100));
    drop(handle);
    scheduler.advance(ms(1000));
    assert_eq!(hits.get(), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn timers_fire_in_due_order() {
    let scheduler = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let slow_log = Rc::clone(&log);
    let fast_log = Rc::clone(&log);
    let _slow = scheduler.after(ms(300), Box::new(move || slow_log.borrow_mut().push("slow")));
    let _fast = scheduler.every(ms(200), Box::new(move || fast_log.borrow_mut().push("fast")));
    scheduler.advance(ms(450));
    assert_eq!(*log.borrow(), ["fast", "slow", "fast"]);
}

#[test]
fn task_can_cancel_its_own_timer() {
    let scheduler = ManualScheduler::new();
    let slot: Rc<RefCell<Option<ManualHandle>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));
    let task_slot = Rc::clone(&slot);
    let task_hits = Rc::clone(&hits);
    let handle = scheduler.every(
        ms(10),
        Box::new(move || {
            task_hits.set(task_hits.get() + 1);
            task_slot.borrow_mut().take();
        }),
    );
    *slot.borrow_mut() = Some(handle);
    scheduler.advance(ms(100));
    assert_eq!(hits.get(), 1);
}

#[test]
fn task_can_schedule_new_timers() {
    let scheduler = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let keep: Rc<RefCell<Vec<ManualHandle>>> = Rc::new(RefCell::new(Vec::new()));
    let inner_scheduler = scheduler.clone();
    let inner_hits = Rc::clone(&hits);
    let inner_keep = Rc::clone(&keep);
    let _outer = scheduler.after(
        ms(10),
        Box::new(move || {
            let hits = Rc::clone(&inner_hits);
            let handle = inner_scheduler.after(ms(10), Box::new(move || hits.set(hits.get() + 1)));
            inner_keep.borrow_mut().push(handle);
        }),
    );
    scheduler.advance(ms(15));
    assert_eq!(hits.get(), 0);
    scheduler.advance(ms(5));
    assert_eq!(hits.get(), 1);
}

#[test]
fn zero_period_is_clamped() {
    let scheduler = ManualScheduler::new();
    let (hits, task) = counter();
    let _handle = scheduler.every(Duration::ZERO, task);
    scheduler.advance(ms(5));
    assert_eq!(hits.get(), 5);
}
