use std::time::Duration;

use assert_matches::*;
use async_trait::async_trait;
use futures::Future;
use pretty_assertions::assert_eq;
use rstest::*;
use tokio::sync::broadcast;
use tokio::time::{error::Elapsed, timeout};

use crate::tunelet_player::{
    LoopMode, MockPort, PlayerEvent, Playlist, PortCall, Settings, Track, TransportPhase,
    TuneletPlayer,
};

#[async_trait]
trait TimedFut<T> {
    async fn timed_recv(&mut self) -> T;
}

#[async_trait]
impl TimedFut<Option<PlayerEvent>> for broadcast::Receiver<PlayerEvent> {
    async fn timed_recv(&mut self) -> Option<PlayerEvent> {
        timed_await(self.recv()).await.unwrap().ok()
    }
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

async fn timed_await<T>(future: T) -> Result<T::Output, Elapsed>
where
    T: Future,
{
    timeout(Duration::from_secs(10), future).await
}

fn get_test_playlist(num_tracks: u32) -> Playlist {
    Playlist::new(
        (1..=num_tracks)
            .map(|id| {
                Track::new(
                    id,
                    format!("/music/track{id}.mp3"),
                    format!("Track {id}"),
                    "Test Artist",
                )
            })
            .collect(),
    )
    .unwrap()
}

async fn init_player(
    num_tracks: u32,
) -> (TuneletPlayer, broadcast::Receiver<PlayerEvent>, MockPort) {
    let port = MockPort::new().with_default_duration(200.0);
    let player = TuneletPlayer::new(
        port.clone(),
        get_test_playlist(num_tracks),
        Settings {
            shuffle_seed: Some(1),
            ..Default::default()
        },
    );
    let mut receiver = player.subscribe();

    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Started(state)) if state.track_index == 0 && state.phase == TransportPhase::Paused
    );
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::DurationChanged(state)) if state.duration == 200.0
    );
    (player, receiver, port)
}

async fn start_playing(player: &TuneletPlayer, receiver: &mut broadcast::Receiver<PlayerEvent>) {
    player.toggle_play().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Loading(_)));
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Resume(state)) if state.phase == TransportPhase::Playing
    );
}

#[tokio::test(start_paused = true)]
async fn test_start_applies_initial_state() {
    let (player, _receiver, port) = init_player(3).await;
    assert_eq!(
        vec![
            PortCall::Load(1),
            PortCall::SetVolume(0.75),
            PortCall::SetMuted(false)
        ],
        port.calls()
    );
    let status = player.get_current_status().await.unwrap();
    assert_eq!(75, status.volume);
    assert_eq!(0.0, status.progress);
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_toggle_play() {
    let (player, mut receiver, port) = init_player(3).await;
    start_playing(&player, &mut receiver).await;
    assert!(port.is_playing());

    player.toggle_play().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Loading(_)));
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Pause(state)) if state.phase == TransportPhase::Paused
    );
    assert!(!port.is_playing());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_toggle_ignored_while_loading() {
    let (player, mut receiver, port) = init_player(3).await;
    port.clear_calls();

    player.toggle_play().await.unwrap();
    player.toggle_play().await.unwrap();
    player.toggle_play().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Loading(_)));
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Resume(_)));

    let status = player.get_current_status().await.unwrap();
    assert_eq!(TransportPhase::Playing, status.phase);
    assert_eq!(vec![PortCall::Play], port.calls());
    player.join().await.unwrap();
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[tokio::test(start_paused = true)]
async fn test_next_previous_while_paused(#[case] num_tracks: u32) {
    let (player, mut receiver, port) = init_player(num_tracks).await;

    player.next().await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::TrackChanged(state)) if state.track_index == 1 % num_tracks as usize
    );
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::DurationChanged(_)));

    player.previous().await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::TrackChanged(state)) if state.track_index == 0 && state.phase == TransportPhase::Paused
    );
    assert!(!port.is_playing());
    assert_eq!(Some(1), port.loaded());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_next_while_playing() {
    let (player, mut receiver, port) = init_player(3).await;
    start_playing(&player, &mut receiver).await;

    player.next().await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Loading(state)) if state.track_index == 0
    );
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::TrackChanged(state)) if state.track_index == 1
    );
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Resume(state)) if state.track_index == 1
    );
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::DurationChanged(_)));
    assert_eq!(Some(2), port.loaded());
    assert!(port.is_playing());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_seek() {
    let (player, mut receiver, port) = init_player(3).await;

    player.seek(0.5).await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Seek(state, position)) if position == 100.0 && state.progress == 50.0
    );
    assert_eq!(100.0, port.position());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_position_updates() {
    let (player, mut receiver, port) = init_player(3).await;

    port.advance_to(50.0).unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Position(state)) if state.current_time == 50.0 && state.progress == 25.0
    );
    port.advance_to(500.0).unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Position(state)) if state.current_time == 200.0 && state.progress == 100.0
    );
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_volume_and_mute() {
    let (player, mut receiver, port) = init_player(3).await;

    player.set_volume(0.3).await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::SetVolume(state)) if state.volume == 30
    );
    assert_eq!(0.3, port.volume());

    player.toggle_mute().await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::SetMuted(state)) if state.muted && state.volume == 30
    );
    assert!(port.is_muted());
    assert_eq!(0.3, port.volume());

    player.toggle_mute().await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::SetMuted(state)) if !state.muted
    );
    assert!(!port.is_muted());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_loop_mode_cycles() {
    let (player, mut receiver, _port) = init_player(3).await;

    for expected in [LoopMode::All, LoopMode::One, LoopMode::Off] {
        player.toggle_loop().await.unwrap();
        assert_matches!(
            receiver.timed_recv().await,
            Some(PlayerEvent::LoopModeChanged(state)) if state.loop_mode == expected
        );
    }
    player.toggle_shuffle().await.unwrap();
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::ShuffleChanged(state)) if state.shuffle
    );
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_playlist_end_stops() {
    let (player, mut receiver, port) = init_player(2).await;
    player.next().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::TrackChanged(_)));
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::DurationChanged(_)));
    start_playing(&player, &mut receiver).await;

    port.finish().unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Ended(_)));
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::PlaylistEnded(state))
            if state.phase == TransportPhase::Paused && state.track_index == 1 && state.progress == 100.0
    );
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_loop_all_wraps() {
    let (player, mut receiver, port) = init_player(2).await;
    player.toggle_loop().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::LoopModeChanged(_)));
    player.next().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::TrackChanged(_)));
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::DurationChanged(_)));
    start_playing(&player, &mut receiver).await;

    port.finish().unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Ended(_)));
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::TrackChanged(state))
            if state.phase == TransportPhase::Playing && state.track_index == 0
    );
    assert_eq!(Some(1), port.loaded());
    assert!(port.is_playing());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_loop_one_repeats() {
    let (player, mut receiver, port) = init_player(3).await;
    player.toggle_loop().await.unwrap();
    player.toggle_loop().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::LoopModeChanged(_)));
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::LoopModeChanged(_)));
    start_playing(&player, &mut receiver).await;

    port.advance_to(120.0).unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Position(_)));
    port.finish().unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Ended(_)));
    assert_matches!(
        receiver.timed_recv().await,
        Some(PlayerEvent::Resume(state)) if state.track_index == 0 && state.current_time == 0.0
    );
    assert_eq!(0.0, port.position());
    assert!(port.is_playing());
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shuffle_skips_current() {
    let (player, mut receiver, port) = init_player(4).await;
    player.toggle_shuffle().await.unwrap();
    assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::ShuffleChanged(_)));
    start_playing(&player, &mut receiver).await;

    let mut current = 0;
    for _ in 0..10 {
        port.finish().unwrap();
        assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::Ended(_)));
        let next = match receiver.timed_recv().await {
            Some(PlayerEvent::TrackChanged(state)) => state.track_index,
            other => panic!("Unexpected event {other:?}"),
        };
        assert_ne!(current, next);
        assert_matches!(receiver.timed_recv().await, Some(PlayerEvent::DurationChanged(_)));
        current = next;
    }
    player.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_commands_fail_after_join() {
    let (player, _receiver, port) = init_player(1).await;
    player.join().await.unwrap();
    assert!(port.emit(crate::tunelet_player::MediaEvent::Ended).is_err());
}
