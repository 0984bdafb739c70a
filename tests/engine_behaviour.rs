use airstrum::{
    dsp::{KarplusStrong, Noise},
    engine::{PluckScheduler, TriggerQueue},
    engine_pair,
    io::wire::parse_line,
    sequencing::autokey,
    synth::{StringBank, StrumDirection, SynthMessage, VoiceState},
    Command, EngineConfig, Gesture, NUM_STRINGS,
};
use rustfft::{num_complex::Complex, FftPlanner};

/// Render until every string of the current strum has fired; returns the
/// pluck tick of each string.
fn pluck_ticks(direction: Gesture, velocity: i32) -> [u64; NUM_STRINGS] {
    let (mut handle, mut engine) = engine_pair(EngineConfig::default()).unwrap();
    handle
        .submit(&Command::new("Em", direction, velocity))
        .unwrap();
    while engine.bank().active_count() < NUM_STRINGS {
        engine.next_sample();
        assert!(engine.now() < 16_000, "strum never completed");
    }
    std::array::from_fn(|i| engine.bank().voice(i).unwrap().age())
}

#[test]
fn decay_is_monotonic_and_bounded() {
    let config = EngineConfig::default();
    let bank = StringBank::new(&config);
    let response = bank.response();

    assert_eq!(response.decay(0), config.decay_min);
    assert!((response.decay(127) - config.decay_max).abs() < 1e-6);

    let mut prev = response.decay(0);
    for v in 0..=127u8 {
        let d = response.decay(v);
        assert!(d >= prev, "decay dropped at velocity {}", v);
        assert!(
            (config.decay_min..=config.decay_max + 1e-6).contains(&d),
            "decay {} out of band at velocity {}",
            d,
            v
        );
        prev = d;
    }
}

#[test]
fn inter_delay_runs_from_slow_to_fast() {
    let config = EngineConfig::default();
    let scheduler = PluckScheduler::from_config(&config);
    assert_eq!(scheduler.inter_delay_ms(0), config.inter_delay_ms_slow);
    assert!((scheduler.inter_delay_ms(127) - config.inter_delay_ms_fast).abs() < 1e-5);
    for v in 1..=127u8 {
        assert!(scheduler.inter_delay_ms(v) <= scheduler.inter_delay_ms(v - 1));
    }
}

#[test]
fn down_and_up_strums_mirror_each_other() {
    for velocity in [0, 64, 127] {
        let down = pluck_ticks(Gesture::StrumDown, velocity);
        let up = pluck_ticks(Gesture::StrumUp, velocity);

        // Down: low string first
        assert!(down.windows(2).all(|w| w[0] <= w[1]), "down order {:?}", down);
        // Up is the same timing, high string first
        let mut mirrored = up;
        mirrored.reverse();
        assert_eq!(down, mirrored, "velocity {}", velocity);
        assert_eq!(down[0], 0);
    }
}

#[test]
fn softer_strums_spread_wider() {
    let soft = pluck_ticks(Gesture::StrumDown, 10);
    let hard = pluck_ticks(Gesture::StrumDown, 120);
    assert!(soft[5] > hard[5], "soft {:?} vs hard {:?}", soft, hard);
}

#[test]
fn mute_chokes_within_one_tick_then_silence() {
    let config = EngineConfig::default();
    let choke_len = config.choke_length_samples();
    let (mut handle, mut engine) = engine_pair(config).unwrap();

    handle
        .submit(&Command::new("G", Gesture::StrumDown, 127))
        .unwrap();
    let mut block = vec![0.0f32; 4000];
    engine.render_block(&mut block);
    assert_eq!(engine.bank().active_count(), NUM_STRINGS);
    assert!(block.iter().any(|s| s.abs() > 0.01), "strum was silent");

    handle.submit(&Command::new("G", Gesture::Mute, 0)).unwrap();
    let first = engine.next_sample();
    assert_eq!(engine.bank().states(), [VoiceState::Idle; NUM_STRINGS]);
    assert!(first != 0.0, "choke transient should start immediately");

    // Transient lasts exactly choke_len samples including the first
    let mut transient = 1;
    while engine.choke().is_active() {
        engine.next_sample();
        transient += 1;
        assert!(transient <= choke_len, "choke outlasted its length");
    }
    assert_eq!(transient, choke_len);

    let mut tail = vec![1.0f32; 16_000];
    engine.render_block(&mut tail);
    assert!(tail.iter().all(|&s| s == 0.0), "output not silent after choke");
}

#[test]
fn mute_drops_pending_triggers() {
    let (mut handle, mut engine) = engine_pair(EngineConfig::default()).unwrap();
    handle
        .submit(&Command::new("C", Gesture::StrumUp, 0))
        .unwrap();
    engine.next_sample();
    assert_eq!(engine.triggers().len(), NUM_STRINGS - 1);

    handle.submit(&Command::new("C", Gesture::Mute, 0)).unwrap();
    engine.render_block(&mut vec![0.0; 3200]);
    assert_eq!(engine.bank().active_count(), 0);
    assert!(engine.triggers().is_empty());
    assert_eq!(engine.stats().snapshot().plucks, 1);
}

#[test]
fn out_of_range_velocity_and_volume_are_clamped() {
    let (mut handle, _engine) = engine_pair(EngineConfig::default()).unwrap();

    let message = handle
        .submit(&Command::new("Am", Gesture::StrumDown, 200).with_volume(-5))
        .unwrap();
    assert!(matches!(message, SynthMessage::Strum { velocity: 127, .. }));
    assert_eq!(handle.volume().get(), 0.0);

    let message = parse_line("Am|STRUM_UP|-40|250").unwrap();
    let message = handle.submit(&message).unwrap();
    assert!(matches!(message, SynthMessage::Strum { velocity: 0, direction: StrumDirection::Up, .. }));
    assert_eq!(handle.volume().get(), 1.0);
}

#[test]
fn legacy_record_plays_at_full_volume() {
    let (mut handle, _engine) = engine_pair(EngineConfig::default()).unwrap();
    handle.volume().set_percent(30);

    let command = parse_line("Em|STRUM_DOWN|90\r\n").unwrap();
    assert_eq!(command.volume, None);
    assert_eq!(command.volume(), 100);
    handle.submit(&command).unwrap();
    assert_eq!(handle.volume().get(), 1.0);
}

#[test]
fn autokey_progression_opens_on_repeated_chord_and_wraps() {
    let sequence = autokey::default_progression();
    assert_eq!(sequence[0], sequence[1]);
    assert_eq!(sequence[1], sequence[2]);

    let (mut handle, _engine) = engine_pair(EngineConfig {
        command_queue_capacity: 1024,
        ..EngineConfig::default()
    })
    .unwrap();

    let len = handle.autokey().len();
    for _ in 0..len {
        handle
            .submit(&Command::new("AUTOKEY", Gesture::StrumDown, 64))
            .unwrap();
    }
    assert_eq!(handle.autokey().index(), 0, "index should wrap to the start");
}

#[test]
fn trigger_queue_overflow_drops_newest() {
    let config = EngineConfig::default();
    let scheduler = PluckScheduler::from_config(&config);
    let mut queue = TriggerQueue::new(config.max_queued_plucks);
    let notes = [40, 45, 50, 55, 59, 64];

    let strums = config.max_queued_plucks / NUM_STRINGS;
    for _ in 0..strums {
        scheduler.schedule(StrumDirection::Down, &notes, 64, 0, &mut queue);
    }
    assert_eq!(queue.len(), config.max_queued_plucks);

    let result = scheduler.schedule(StrumDirection::Down, &notes, 64, 0, &mut queue);
    assert_eq!(result.queued, 0);
    assert_eq!(queue.len(), config.max_queued_plucks);

    // Through the engine: overflow is counted and rendering carries on
    let (mut handle, mut engine) = engine_pair(config).unwrap();
    for _ in 0..=strums {
        handle
            .submit(&Command::new("D", Gesture::StrumDown, 5))
            .unwrap();
    }
    engine.next_sample();
    assert_eq!(engine.triggers().len() + engine.stats().snapshot().plucks as usize, 24);
    assert_eq!(handle.report_overflows().dropped_triggers, NUM_STRINGS as u64);

    let mut block = vec![0.0f32; 2048];
    engine.render_block(&mut block);
    assert!(block.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
}

#[test]
fn string_rings_at_its_pitch() {
    let sample_rate = 16_000.0f32;
    let frequency = 659.26; // E5
    let mut noise = Noise::new(7);
    let mut string = KarplusStrong::new(512);
    string.pluck(sample_rate, frequency, 0.9985, 0.2, &mut noise);

    // Let the upper harmonics die away first
    for _ in 0..4800 {
        string.next_sample();
    }

    const N: usize = 4096;
    let mut spectrum: Vec<Complex<f32>> = (0..N)
        .map(|i| {
            let hann = 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / N as f32).cos();
            Complex::new(string.next_sample() * hann, 0.0)
        })
        .collect();
    FftPlanner::new().plan_fft_forward(N).process(&mut spectrum);

    let peak_bin = spectrum[1..N / 2]
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
        .map(|(i, _)| i + 1)
        .unwrap();
    let peak_hz = peak_bin as f32 * sample_rate / N as f32;

    // The averaging filter adds half a sample to the loop
    let expected = sample_rate / (string.delay_len() as f32 + 0.5);
    let bin_hz = sample_rate / N as f32;
    assert!(
        (peak_hz - expected).abs() <= 2.0 * bin_hz,
        "peak at {} Hz, expected about {} Hz",
        peak_hz,
        expected
    );
}
