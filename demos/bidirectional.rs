use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use endless_scroll::{EngineOptions, Layout, PageDirection, Rect, ScrollEngine, Viewport};

const ROW: f64 = 32.0;
const PANE_TOP: f64 = 60.0;
const PAGE_SIZE: i64 = 25;

struct Fixed(f64);

impl Viewport for Fixed {
    fn scroll_top(&self) -> f64 {
        0.0
    }

    fn height(&self) -> f64 {
        self.0
    }
}

// A scrollable pane nested in a page that does not scroll itself.
struct Pane {
    scroll_top: Cell<f64>,
    height: f64,
}

impl Viewport for Pane {
    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn listen(&self, enabled: bool) {
        println!("pane listening: {enabled}");
    }
}

struct Dom {
    page: Fixed,
    pane: Arc<Pane>,
    spacer: Cell<f64>,
    rendered: RefCell<Vec<i64>>,
}

impl Dom {
    fn render(&self, spacer: f64, rows: &[i64]) {
        self.spacer.set(spacer);
        *self.rendered.borrow_mut() = rows.to_vec();
    }

    // Page-space top of the list content, which moves as the pane scrolls.
    fn content_top(&self) -> f64 {
        PANE_TOP - self.pane.scroll_top.get()
    }
}

impl Layout<i64> for Dom {
    fn page(&self) -> &dyn Viewport {
        &self.page
    }

    fn container(&self) -> Option<Rect> {
        let height = self.spacer.get() + self.rendered.borrow().len() as f64 * ROW;
        Some(Rect::new(self.content_top(), height))
    }

    fn for_each_rendered_item(&self, f: &mut dyn FnMut(&i64, Rect)) {
        let top = self.content_top() + self.spacer.get();
        for (i, id) in self.rendered.borrow().iter().enumerate() {
            f(id, Rect::new(top + i as f64 * ROW, ROW));
        }
    }
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let hook = {
        let count = Arc::clone(&count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    };
    (count, hook)
}

fn main() {
    let pane = Arc::new(Pane {
        scroll_top: Cell::new(PAGE_SIZE as f64 * ROW / 2.0),
        height: 300.0,
    });
    let (next, on_next) = counter();
    let (previous, on_previous) = counter();

    let options = EngineOptions::new()
        .with_viewport(Some(pane.clone() as Arc<dyn Viewport>))
        .with_source_expression("message in thread.messages track by message.id")
        .with_on_request_next(Some(on_next))
        .with_on_request_previous(Some(on_previous));

    let dom = Dom {
        page: Fixed(800.0),
        pane: Arc::clone(&pane),
        spacer: Cell::new(0.0),
        rendered: RefCell::new(Vec::new()),
    };

    let mut engine = match ScrollEngine::new(options, dom) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("invalid options: {err}");
            return;
        }
    };
    if let Some(expr) = engine.source_expression() {
        println!("bound {} over {}", expr.item, expr.collection);
    }

    let mut source: Vec<i64> = (0..PAGE_SIZE).collect();
    let (mut served_next, mut served_previous) = (0usize, 0usize);
    let mut now = 0u64;

    engine.on_source_collection_changed(source.clone(), now);
    engine.tick(now);
    engine
        .layout()
        .render(engine.spacer_height(), engine.display_window());

    // Scroll up for a while, then back down.
    for frame in 0..80 {
        now += 40;
        let delta = if frame < 40 { -45.0 } else { 90.0 };
        let top = (pane.scroll_top.get() + delta).max(0.0);
        pane.scroll_top.set(top);
        engine.on_scroll(now);
        engine.tick(now);

        if previous.load(Ordering::SeqCst) > served_previous {
            served_previous += 1;
            let first = source.first().copied().unwrap_or(0);
            let mut page: Vec<i64> = (first - PAGE_SIZE..first).collect();
            page.extend(source.drain(..));
            source = page;
            engine.on_source_collection_changed(source.clone(), now);
            // Keep the same rows under the user's eyes.
            pane.scroll_top.set(pane.scroll_top.get() + PAGE_SIZE as f64 * ROW);
        }

        if next.load(Ordering::SeqCst) > served_next {
            served_next += 1;
            let last = source.last().copied().unwrap_or(-1);
            source.extend(last + 1..=last + PAGE_SIZE);
            engine.on_source_collection_changed(source.clone(), now);
        }

        engine
            .layout()
            .render(engine.spacer_height(), engine.display_window());

        if frame % 8 == 0 {
            let display = engine.display_window();
            println!(
                "t={now}ms pane={} source=[{:?}..{:?}] rendered=[{:?}..{:?}] spacer={} status={:?}",
                pane.scroll_top.get(),
                source.first(),
                source.last(),
                display.first(),
                display.last(),
                engine.spacer_height(),
                engine.scroll_status(),
            );
        }
    }

    // Let the last throttled check run and forget whatever it asked for.
    now += engine.config().scroll_throttle_ms;
    engine.tick(now);
    engine.clear_pending(PageDirection::Next);
    engine.clear_pending(PageDirection::Previous);

    // A request that never gets answered expires after the pending timeout.
    let is_pending = |e: &ScrollEngine<i64, i64, Dom>| e.pending_state().is_pending(PageDirection::Next);
    engine.request_next(now);
    println!("pending next: {}", is_pending(&engine));
    let expiry = now + engine.config().pending_timeout_ms;
    assert_eq!(engine.next_deadline(), Some(expiry));
    engine.tick(expiry);
    println!("pending next at {expiry}ms: {}", is_pending(&engine));

    engine.dispose();
    println!(
        "requests: next={} previous={}",
        next.load(Ordering::SeqCst),
        previous.load(Ordering::SeqCst)
    );
}
