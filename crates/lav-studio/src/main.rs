use lav_engine::logging::LoggingConfig;
use lav_ui::prelude::*;

fn main() -> anyhow::Result<()> {
    Application::new()
        .title("Lav Studio")
        .size(960.0, 600.0)
        .logging(LoggingConfig::default().filter("info,lav_ui=debug,wgpu_core=warn,wgpu_hal=warn"))
        .run(build)
}

/// Split view: a scrolling list of buttons on the left, a settings column
/// with a slider, a 3x2 grid of swatches and a collapsible outline on the
/// right.
fn build(window: &mut UiWindow) {
    let root = window.root();
    let tree = window.tree_mut();

    let split = tree.create(SplitPane::new(LayoutType::Horizontal).min_size(160.0));
    tree.add(root, split);
    let Some(sp) = tree.get(split).and_then(|n| n.widget().as_split()).cloned() else {
        log::error!("split view missing");
        return;
    };

    // ── left: scrolling list ──────────────────────────────────────────────

    if let Some(left) = sp.pane(0) {
        tree.configure(left, |n| {
            n.kind(LayoutType::Vertical).padding(Edges::all(8)).spacing(Spacing::Tight);
        });
        for i in 0..24 {
            let button = tree.create(Button::new().hover_color(Color::from_hex(0x404249ff)));
            tree.configure(button, |n| {
                n.name(format!("item-{i}"))
                    .scale(ScaleXY::new(Scale::rel(1.0), Scale::px(32.0)))
                    .margin(Edges::symmetric(2, 0))
                    .radius(Edges::all(4));
            });
            if let Some(events) = tree.events_mut(button) {
                events.on::<MouseLeftClickEvt>(move |e| log::info!("item {i} clicked at {:?}", e.pos));
            }
            tree.add(left, button);
        }
    }

    // ── right: settings ───────────────────────────────────────────────────

    let Some(right) = sp.pane(1) else { return };
    tree.configure(right, |n| {
        n.kind(LayoutType::Vertical).padding(Edges::all(16)).align(Align::TopCenter);
    });

    let slider = tree.create(Slider::new().range(0.0, 1.0).value(0.5).sensitivity(0.05));
    tree.configure(slider, |n| {
        n.name("opacity").margin(Edges::symmetric(8, 0));
    });
    if let Some(events) = tree.events_mut(slider) {
        events.on::<SliderEvt>(|e| log::info!("opacity = {:.2}", e.value));
    }
    tree.add(right, slider);

    let grid = tree.create(Widget::Block);
    tree.configure(grid, |n| {
        n.name("swatches").kind(LayoutType::Grid).scale(ScaleXY::px(300.0, 200.0)).padding(Edges::all(4));
        n.layout.grid = GridSpec::new(vec![Scale::fr(1.0); 3], vec![Scale::fr(1.0), Scale::fr(2.0)]);
    });
    tree.add(right, grid);

    let colors = [0xed4245ff, 0xfee75cff, 0x57f287ff, 0x5865f2ff, 0xeb459eff, 0xffffffff];
    for (i, hex) in colors.into_iter().enumerate() {
        let cell = tree.create(Widget::Block);
        tree.configure(cell, |n| {
            n.scale(ScaleXY::px(48.0, 48.0)).color(Color::from_hex(hex)).radius(Edges::all(24));
            n.layout.grid_pos = GridCell::new((i / 3) as u16, (i % 3) as u16);
            n.layout.self_align = Align::Center;
        });
        tree.add(grid, cell);
    }

    let mut outline = TreeView::new().indent(16.0);
    let (even, odd) = (Color::from_hex(0xdfdfdfff), Color::from_hex(0xa8a8a8ff));
    for g in 0..20 {
        let group = outline.add_root(format!("group {g}"), if g % 2 == 0 { even } else { odd });
        for i in 0..5 {
            outline.add_child(group, format!("entry {g}.{i}"), if i % 2 == 0 { odd } else { even });
        }
    }
    let outline = tree.create(outline);
    tree.configure(outline, |n| {
        n.name("outline")
            .scale(ScaleXY::new(Scale::px(300.0), Scale::fill()))
            .margin(Edges::symmetric(8, 0))
            .color(Color::from_hex(0x69c553ff));
    });
    tree.add(right, outline);
}
