#![no_main]
use std::time::Duration;

use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use libtunelet_player::tunelet_player::{
    MediaEvent, MockPort, NavigationOverlap, PlayerState, Playlist, Settings, TuneletPlayer,
};
use tokio::runtime::Builder;

#[derive(Arbitrary, Debug)]
enum Input {
    TogglePlay,
    Next,
    Previous,
    Seek(u16),
    SetVolume(u8),
    ToggleMute,
    ToggleLoop,
    ToggleShuffle,
    TimeUpdate(u16),
    MetadataLoaded(u16),
    Ended,
    Wait(u16),
}

#[derive(Arbitrary, Debug)]
struct Session {
    restart_overlap: bool,
    seed: u64,
    inputs: Vec<Input>,
}

#[ctor::ctor]
fn init() {
    tracing_subscriber::fmt()
        .pretty()
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_test_writer()
        .init();
}

fn check_invariants(state: &PlayerState, playlist: &Playlist) {
    assert!(state.track_index < playlist.len());
    assert!((0.0..=100.0).contains(&state.progress));
    assert!(state.volume <= 100);
    assert!(state.current_time >= 0.0);
    if state.duration > 0.0 {
        assert!(state.current_time <= state.duration);
    }
}

fuzz_target!(|session: Session| {
    let runtime = Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();

    runtime.block_on(async {
        let port = MockPort::new().with_default_duration(180.0);
        let playlist = Playlist::bundled();
        let player = TuneletPlayer::new(
            port.clone(),
            playlist.clone(),
            Settings {
                navigation_overlap: if session.restart_overlap {
                    NavigationOverlap::Restart
                } else {
                    NavigationOverlap::Concurrent
                },
                shuffle_seed: Some(session.seed),
                ..Default::default()
            },
        );

        for input in session.inputs {
            match input {
                Input::TogglePlay => player.toggle_play().await.unwrap(),
                Input::Next => player.next().await.unwrap(),
                Input::Previous => player.previous().await.unwrap(),
                Input::Seek(value) => player.seek(f64::from(value) / 1000.0).await.unwrap(),
                Input::SetVolume(value) => {
                    player.set_volume(f64::from(value) / 200.0).await.unwrap()
                }
                Input::ToggleMute => player.toggle_mute().await.unwrap(),
                Input::ToggleLoop => player.toggle_loop().await.unwrap(),
                Input::ToggleShuffle => player.toggle_shuffle().await.unwrap(),
                Input::TimeUpdate(value) => port
                    .emit(MediaEvent::TimeUpdate(f64::from(value) / 10.0))
                    .unwrap(),
                Input::MetadataLoaded(value) => port
                    .emit(MediaEvent::MetadataLoaded {
                        duration: f64::from(value) / 10.0,
                    })
                    .unwrap(),
                Input::Ended => port.finish().unwrap(),
                Input::Wait(millis) => {
                    tokio::time::sleep(Duration::from_millis(u64::from(millis))).await
                }
            }
            let state = player.get_current_status().await.unwrap();
            check_invariants(&state, &playlist);
        }
        player.join().await.unwrap();
    });
});
