use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use endless_scroll::{EngineOptions, Layout, Rect, ScrollEngine, Viewport};

const ROW: f64 = 40.0;
const HEADER: f64 = 100.0;
const PAGE_SIZE: u64 = 20;

// A simulated page: a header followed by the list, rows of fixed height.
struct Window {
    scroll_top: Cell<f64>,
    height: f64,
}

impl Viewport for Window {
    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn height(&self) -> f64 {
        self.height
    }
}

struct Dom {
    window: Window,
    spacer: Cell<f64>,
    rendered: RefCell<Vec<u64>>,
}

impl Dom {
    fn render(&self, spacer: f64, rows: &[u64]) {
        self.spacer.set(spacer);
        *self.rendered.borrow_mut() = rows.to_vec();
    }
}

impl Layout<u64> for Dom {
    fn page(&self) -> &dyn Viewport {
        &self.window
    }

    fn container(&self) -> Option<Rect> {
        let height = self.spacer.get() + self.rendered.borrow().len() as f64 * ROW;
        Some(Rect::new(HEADER, height))
    }

    fn for_each_rendered_item(&self, f: &mut dyn FnMut(&u64, Rect)) {
        let top = HEADER + self.spacer.get();
        for (i, id) in self.rendered.borrow().iter().enumerate() {
            f(id, Rect::new(top + i as f64 * ROW, ROW));
        }
    }
}

fn main() {
    let requests = Arc::new(AtomicUsize::new(0));
    let options = EngineOptions::new().with_on_request_next(Some({
        let requests = Arc::clone(&requests);
        move || {
            requests.fetch_add(1, Ordering::SeqCst);
        }
    }));

    let dom = Dom {
        window: Window {
            scroll_top: Cell::new(0.0),
            height: 400.0,
        },
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

    let mut source: Vec<u64> = (0..PAGE_SIZE).collect();
    let mut served = 0usize;
    let mut now = 0u64;

    engine.on_source_collection_changed(source.clone(), now);
    engine.tick(now);
    engine
        .layout()
        .render(engine.spacer_height(), engine.display_window());
    engine.check(now);

    for frame in 0..60 {
        now += 50;

        // User scrolls down 60px per frame.
        let window = &engine.layout().window;
        window.scroll_top.set(window.scroll_top.get() + 60.0);
        engine.on_scroll(now);
        engine.tick(now);

        // The "backend" answers every request with another page.
        if requests.load(Ordering::SeqCst) > served {
            served += 1;
            let start = source.len() as u64;
            source.extend(start..start + PAGE_SIZE);
            engine.on_source_collection_changed(source.clone(), now);
        }

        engine
            .layout()
            .render(engine.spacer_height(), engine.display_window());

        if frame % 10 == 0 {
            let display = engine.display_window();
            println!(
                "t={now}ms scroll_top={} source={} rendered={} [{:?}..{:?}] spacer={} pending={:?}",
                engine.layout().window.scroll_top.get(),
                source.len(),
                display.len(),
                display.first(),
                display.last(),
                engine.spacer_height(),
                engine.pending_state(),
            );
        }
    }

    engine.dispose();
    println!("requests={}", requests.load(Ordering::SeqCst));
}
