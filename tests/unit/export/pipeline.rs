use super::*;
use crate::animation::anim::AnimationConfig;
use crate::effects::model::{EffectKind, EffectParams};
use crate::encode::sink::InMemorySink;
use crate::glyph::provider::MemoryOutlineProvider;
use crate::path::command::parse;

fn provider() -> MemoryOutlineProvider {
    let mut p = MemoryOutlineProvider::new(100.0);
    p.insert('H', parse("M0 0 L20 0 L20 70 L0 70 Z M40 0 L60 0 L60 70 L40 70 Z"), 70.0);
    p
}

fn small_opts(fps: f64, duration_secs: f64) -> ExportOpts {
    ExportOpts {
        width: 32,
        height: 16,
        fps,
        duration_secs,
        ..ExportOpts::default()
    }
}

#[derive(Default)]
struct RecordingHost {
    progress: Vec<f64>,
    yields: usize,
    cancel_on_yield: Option<usize>,
}

impl ExportHost for RecordingHost {
    fn progress(&mut self, fraction: f64) {
        self.progress.push(fraction);
    }

    fn yield_now(&mut self) -> ControlFlow<()> {
        self.yields += 1;
        match self.cancel_on_yield {
            Some(n) if self.yields >= n => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

#[test]
fn timing_follows_fps_and_duration() {
    assert_eq!(frame_timing(10.0, 2.0).unwrap(), (20, 100));
    assert_eq!(frame_timing(3.0, 0.1).unwrap(), (1, 333));
    assert_eq!(frame_timing(15.0, 0.0).unwrap(), (1, 67));
    assert!(frame_timing(0.0, 1.0).is_err());
    assert!(frame_timing(f64::NAN, 1.0).is_err());
    assert!(frame_timing(10.0, -1.0).is_err());
}

#[test]
fn timing_rejects_zero_delays_and_oversized_exports() {
    // 200 fps is a 5 ms delay, which still rounds up to 1 cs.
    assert_eq!(frame_timing(200.0, 1.0).unwrap(), (200, 5));
    assert!(matches!(
        frame_timing(250.0, 1.0),
        Err(GlyphfxError::Validation(_))
    ));
    assert!(frame_timing(3000.0, 0.5).is_err());
    assert_eq!(frame_timing(100.0, 100.0).unwrap().0, MAX_FRAMES);
    assert!(frame_timing(100.0, 100.1).is_err());
}

#[test]
fn exports_every_frame_in_order_with_progress() {
    let job = ExportJob::new("H", false, &[], &EffectAnimations::new(), small_opts(10.0, 2.0));
    let mut sink = InMemorySink::new();
    let mut host = RecordingHost::default();
    assert_eq!(job.run(&provider(), &mut sink, &mut host).unwrap(), 20);

    assert!(sink.is_finished());
    assert_eq!(sink.config().map(|c| c.frame_count), Some(20));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, (0..20).collect::<Vec<_>>());
    assert!(sink.frames().iter().all(|(_, f)| f.delay_ms == 100
        && f.width == 32
        && f.height == 16
        && f.indices.len() == 32 * 16
        && f.palette.len() <= 256));

    assert_eq!(host.progress.len(), 20);
    assert!(host.progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(host.progress.last(), Some(&1.0));
    // Yields after frames 3, 6, ..., 18; never after the last one.
    assert_eq!(host.yields, 6);
}

#[test]
fn no_yield_after_the_final_frame() {
    let job = ExportJob::new("H", false, &[], &EffectAnimations::new(), small_opts(3.0, 2.0));
    let mut host = RecordingHost::default();
    job.run(&provider(), &mut InMemorySink::new(), &mut host)
        .unwrap();
    assert_eq!(host.yields, 1);
}

#[test]
fn cancellation_stops_at_the_yield_point() {
    let job = ExportJob::new("H", false, &[], &EffectAnimations::new(), small_opts(10.0, 2.0));
    let mut sink = InMemorySink::new();
    let mut host = RecordingHost {
        cancel_on_yield: Some(2),
        ..RecordingHost::default()
    };
    let err = job.run(&provider(), &mut sink, &mut host).unwrap_err();
    assert!(matches!(
        err,
        GlyphfxError::Cancelled {
            frames_done: 6,
            frames_total: 20
        }
    ));
    assert_eq!(sink.frames().len(), 6);
    assert!(!sink.is_finished());
}

#[test]
fn job_snapshots_effects_and_animations() {
    let mut effects = vec![Effect::new(
        "c",
        EffectParams::defaults(EffectKind::Color),
    )];
    let mut animations = EffectAnimations::new();
    let job = ExportJob::new("H", false, &effects, &animations, small_opts(2.0, 1.0));

    effects.clear();
    animations
        .entry("c".to_owned())
        .or_default()
        .insert("hue".to_owned(), AnimationConfig::default());
    assert_eq!(job.effects.len(), 1);
    assert!(job.animations.is_empty());
}

#[test]
fn animated_parameters_change_frames() {
    let effects = vec![Effect::new(
        "c",
        EffectParams::defaults(EffectKind::Color),
    )];
    let mut animations = EffectAnimations::new();
    animations.entry("c".to_owned()).or_default().insert(
        "lightness".to_owned(),
        AnimationConfig {
            enabled: true,
            min: 0.0,
            max: 100.0,
            ..AnimationConfig::default()
        },
    );
    let job = ExportJob::new("H", false, &effects, &animations, small_opts(2.0, 1.0));
    let mut sink = InMemorySink::new();
    job.run(&provider(), &mut sink, &mut NoopHost).unwrap();

    let frames = sink.frames();
    assert_eq!(frames.len(), 2);
    // t = 0 paints black glyphs, t = 0.5 white ones on the white background.
    let colors = |f: &crate::encode::sink::IndexedFrame| {
        let mut c: Vec<[u8; 3]> = f.indices.iter().map(|&i| f.palette[i as usize]).collect();
        c.sort();
        c.dedup();
        c
    };
    assert!(colors(&frames[0].1).contains(&[0, 0, 0]));
    assert_eq!(colors(&frames[1].1), vec![[255, 255, 255]]);
}

#[test]
fn invalid_options_fail_before_any_frame() {
    let mut opts = small_opts(10.0, 1.0);
    opts.background = "nope".to_owned();
    let job = ExportJob::new("H", false, &[], &EffectAnimations::new(), opts);
    let mut sink = InMemorySink::new();
    assert!(matches!(
        job.run(&provider(), &mut sink, &mut NoopHost),
        Err(GlyphfxError::Validation(_))
    ));
    assert!(sink.config().is_none());

    let job = ExportJob::new("H", false, &[], &EffectAnimations::new(), small_opts(0.0, 1.0));
    assert!(job.run(&provider(), &mut sink, &mut NoopHost).is_err());
}

#[test]
fn export_animation_returns_gif_bytes() {
    let bytes = export_animation(
        "H",
        &provider(),
        false,
        &[],
        &EffectAnimations::new(),
        &small_opts(5.0, 1.0),
        &mut NoopHost,
    )
    .unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    assert_eq!(bytes.last(), Some(&0x3B));
}

#[test]
fn slot_admits_one_export_at_a_time() {
    let slot = ExportSlot::new();
    let ticket = slot.try_acquire().unwrap();
    assert!(slot.is_busy());
    assert!(slot.try_acquire().is_none());
    drop(ticket);
    assert!(!slot.is_busy());
    assert!(slot.try_acquire().is_some());
}

#[test]
fn background_alpha_is_dropped() {
    let opts = |bg: &str| ExportOpts {
        background: bg.to_owned(),
        ..ExportOpts::default()
    };
    assert_eq!(
        opts("transparent").background_rgba().unwrap(),
        Rgba8::rgba(0, 0, 0, 255)
    );
    assert_eq!(
        opts("#ff000080").background_rgba().unwrap(),
        Rgba8::rgba(255, 0, 0, 255)
    );
    assert!(matches!(
        opts("nope").background_rgba(),
        Err(GlyphfxError::Validation(_))
    ));
}
