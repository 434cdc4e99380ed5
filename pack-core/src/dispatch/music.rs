//! Music playback on the pack's audio device.

use crate::action::Audio;
use crate::core::PackCore;
use crate::music::FIRST_TRACK;
use crate::protocol::{PackCommand, SerialCommand, WandCommand};

impl PackCore {
    pub(super) fn wand_music_command(&mut self, cmd: WandCommand, value: u16) -> bool {
        match cmd {
            WandCommand::MusicStart => self.music_play(),
            WandCommand::MusicStop => self.music_stop(),
            WandCommand::MusicNextTrack => self.music_next(),
            WandCommand::MusicPrevTrack => self.music_prev(),
            WandCommand::MusicPlayTrack => self.music_select(value),
            WandCommand::MusicTrackLoopToggle => self.music_toggle_loop(),
            _ => return false,
        }
        true
    }

    pub(super) fn serial1_music_command(&mut self, cmd: SerialCommand, value: u16) -> bool {
        match cmd {
            SerialCommand::MusicStartStop => {
                if self.state.music.is_playing() {
                    self.music_stop();
                } else {
                    self.music_play();
                }
            }
            SerialCommand::MusicPauseResume => {
                if self.state.music.is_paused() {
                    self.music_resume();
                } else {
                    self.music_pause();
                }
            }
            SerialCommand::MusicNextTrack => self.music_next(),
            SerialCommand::MusicPrevTrack => self.music_prev(),
            SerialCommand::MusicPlayTrack => self.music_select(value),
            _ => return false,
        }
        true
    }

    fn music_play(&mut self) {
        if !self.state.music.play() {
            tracing::debug!(count = self.state.music.count(), "no music to play");
            return;
        }
        let track = self.state.music.current();
        let looped = self.state.music.is_looping();
        self.audio(Audio::PlayMusic { track, looped });
        self.to_wand_value(PackCommand::MusicStart, track);
        self.to_serial1_value(SerialCommand::MusicIsPlaying, track);
    }

    fn music_stop(&mut self) {
        self.state.music.stop();
        self.audio(Audio::StopMusic);
        self.to_wand(PackCommand::MusicStop);
        self.to_serial1_value(SerialCommand::MusicIsNotPlaying, self.state.music.current());
    }

    fn music_pause(&mut self) {
        if self.state.music.pause() {
            self.audio(Audio::PauseMusic);
            self.to_wand(PackCommand::MusicPause);
            self.to_serial1(SerialCommand::MusicIsPaused);
        }
    }

    fn music_resume(&mut self) {
        if self.state.music.resume() {
            self.audio(Audio::ResumeMusic);
            self.to_wand(PackCommand::MusicResume);
            self.to_serial1(SerialCommand::MusicIsNotPaused);
        }
    }

    fn music_next(&mut self) {
        let playing = self.state.music.is_playing();
        if playing {
            self.music_stop();
        }
        if let Some(track) = self.state.music.next() {
            self.track_changed(track, playing);
        }
    }

    fn music_prev(&mut self) {
        let playing = self.state.music.is_playing();
        if playing {
            self.music_stop();
        }
        if let Some(track) = self.state.music.prev() {
            self.track_changed(track, playing);
        }
    }

    fn music_select(&mut self, track: u16) {
        if track < FIRST_TRACK || !self.state.music.contains(track) {
            tracing::debug!(track, "track out of range");
            return;
        }
        let playing = self.state.music.is_playing();
        if playing {
            self.music_stop();
        }
        self.state.music.select(track);
        self.track_changed(track, playing);
    }

    fn track_changed(&mut self, track: u16, resume: bool) {
        if resume {
            self.music_play();
        } else {
            self.to_wand_value(PackCommand::MusicPlayTrack, track);
        }
    }

    fn music_toggle_loop(&mut self) {
        let looping = self.state.music.toggle_loop();
        self.audio(Audio::SetMusicLoop(looping));
        if looping {
            self.to_wand(PackCommand::MusicRepeat);
            self.to_serial1(SerialCommand::MusicRepeat);
        } else {
            self.to_wand(PackCommand::MusicNoRepeat);
            self.to_serial1(SerialCommand::MusicNoRepeat);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Audio};
    use crate::core::PackCore;
    use crate::packet::Packet;
    use crate::protocol::{PackCommand, Peer, SerialCommand, WandCommand};

    fn connected(tracks: u16) -> PackCore {
        let mut core = PackCore::default();
        core.set_music_track_count(tracks, 0);
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::Handshake), 0);
        core
    }

    #[test]
    fn start_plays_current_track() {
        let mut core = connected(3);
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::MusicStart), 5);
        assert!(core.state().music.is_playing());
        assert!(out.contains(&Action::Audio(Audio::PlayMusic { track: 500, looped: false })));
        assert!(out.contains(&Action::Send(
            Peer::Serial1,
            Packet::command_with(SerialCommand::MusicIsPlaying, 500)
        )));
    }

    #[test]
    fn next_while_playing_restarts_on_new_track() {
        let mut core = connected(3);
        core.on_packet(Peer::Wand, Packet::command(WandCommand::MusicStart), 5);
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::MusicNextTrack), 6);
        let stop = out.iter().position(|a| *a == Action::Audio(Audio::StopMusic)).unwrap();
        let play = out
            .iter()
            .position(|a| *a == Action::Audio(Audio::PlayMusic { track: 501, looped: false }))
            .unwrap();
        assert!(stop < play);
    }

    #[test]
    fn select_when_idle_only_moves_the_cursor() {
        let mut core = connected(3);
        let out = core.on_packet(Peer::Wand, Packet::command_with(WandCommand::MusicPlayTrack, 502), 5);
        assert_eq!(core.state().music.current(), 502);
        assert!(!core.state().music.is_playing());
        assert_eq!(
            out,
            vec![Action::Send(Peer::Wand, Packet::command_with(PackCommand::MusicPlayTrack, 502))]
        );
    }

    #[test]
    fn tracks_below_the_music_range_are_ignored() {
        let mut core = connected(3);
        let out = core.on_packet(Peer::Serial1, Packet::command_with(SerialCommand::MusicPlayTrack, 42), 5);
        assert!(out.is_empty());
        assert_eq!(core.state().music.current(), 500);
    }

    #[test]
    fn serial1_pause_resume_toggles() {
        let mut core = connected(2);
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::MusicStartStop), 5);
        core.on_packet(Peer::Serial1, Packet::command(SerialCommand::MusicPauseResume), 6);
        assert!(core.state().music.is_paused());
        let out = core.on_packet(Peer::Serial1, Packet::command(SerialCommand::MusicPauseResume), 7);
        assert!(!core.state().music.is_paused());
        assert!(out.contains(&Action::Audio(Audio::ResumeMusic)));
    }
}
