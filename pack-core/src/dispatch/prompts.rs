//! Wand menu echoes that only need a spoken confirmation on the pack.
//!
//! Each entry names the group of prompts to silence and the one to play.

use crate::action::Voice::{self, *};
use crate::core::PackCore;
use crate::protocol::WandCommand;

const BARGRAPH_BLINK: &[Voice] = &[BargraphOverheatBlinkEnabled, BargraphOverheatBlinkDisabled];
const BEEP_LOOP: &[Voice] = &[WandBeepingEnabled, WandBeepingDisabled];
const WAND_SOUNDS: &[Voice] = &[WandSoundsEnabled, WandSoundsDisabled];
const SPEAKER_AMP: &[Voice] = &[WandSpeakerAmpEnabled, WandSpeakerAmpDisabled];
const SPECTRAL_MODES: &[Voice] = &[SpectralModesEnabled, SpectralModesDisabled];
const CTS: &[Voice] = &[Cts1984, Cts1989, CtsAfterlife, CtsFrozenEmpire, CtsDefault];
const WAND_YEAR: &[Voice] = &[Wand1984, Wand1989, WandAfterlife, WandFrozenEmpire, WandDefaultMode];
const QUICK_VENT: &[Voice] = &[QuickVentEnabled, QuickVentDisabled];
const BOOT_ERRORS: &[Voice] = &[BootupErrorsEnabled, BootupErrorsDisabled];
const VENT_LIGHT: &[Voice] = &[VentLightIntensityEnabled, VentLightIntensityDisabled];
const OVERHEAT: &[Voice] = &[OverheatEnabled, OverheatDisabled];
const OVERHEAT_LEVELS: &[Voice] = &[
    OverheatLevelEnabled(1),
    OverheatLevelEnabled(2),
    OverheatLevelEnabled(3),
    OverheatLevelEnabled(4),
    OverheatLevelEnabled(5),
    OverheatLevelDisabled(1),
    OverheatLevelDisabled(2),
    OverheatLevelDisabled(3),
    OverheatLevelDisabled(4),
    OverheatLevelDisabled(5),
];
const SMOKE_DURATIONS: &[Voice] = &[
    OverheatSmokeDuration(1),
    OverheatSmokeDuration(2),
    OverheatSmokeDuration(3),
    OverheatSmokeDuration(4),
    OverheatSmokeDuration(5),
];
const START_TIMERS: &[Voice] = &[
    OverheatStartTimer(1),
    OverheatStartTimer(2),
    OverheatStartTimer(3),
    OverheatStartTimer(4),
    OverheatStartTimer(5),
];
const VOLUME_ADJUST: &[Voice] = &[DefaultSystemVolumeAdjustment];
const BARREL_LEDS: &[Voice] = &[BarrelLed5, BarrelLed48];
const BARGRAPH: &[Voice] = &[
    BargraphInverted,
    BargraphNotInverted,
    DefaultBargraph,
    ModeOriginalBargraph,
    SuperHeroBargraph,
];
const FIRING_ANIMATIONS: &[Voice] = &[
    DefaultFiringAnimations,
    ModeOriginalFiringAnimations,
    SuperHeroFiringAnimations,
];

fn prompt_for(cmd: WandCommand) -> Option<(&'static [Voice], Voice)> {
    use WandCommand as W;
    let entry = match cmd {
        W::BargraphOverheatBlinkEnabled => (BARGRAPH_BLINK, BargraphOverheatBlinkEnabled),
        W::BargraphOverheatBlinkDisabled => (BARGRAPH_BLINK, BargraphOverheatBlinkDisabled),
        W::ModeBeepLoopEnabled => (BEEP_LOOP, WandBeepingEnabled),
        W::ModeBeepLoopDisabled => (BEEP_LOOP, WandBeepingDisabled),
        W::VoiceNeutronaWandSoundsEnabled => (WAND_SOUNDS, WandSoundsEnabled),
        W::VoiceNeutronaWandSoundsDisabled => (WAND_SOUNDS, WandSoundsDisabled),
        W::SoundNeutronaWandSpeakerAmpEnabled => (SPEAKER_AMP, WandSpeakerAmpEnabled),
        W::SoundNeutronaWandSpeakerAmpDisabled => (SPEAKER_AMP, WandSpeakerAmpDisabled),
        W::SpectralModesEnabled => (SPECTRAL_MODES, SpectralModesEnabled),
        W::SpectralModesDisabled => (SPECTRAL_MODES, SpectralModesDisabled),

        W::Cts1984 => (CTS, Cts1984),
        W::Cts1989 => (CTS, Cts1989),
        W::CtsAfterlife => (CTS, CtsAfterlife),
        W::CtsFrozenEmpire => (CTS, CtsFrozenEmpire),
        W::CtsDefault => (CTS, CtsDefault),
        W::NeutronaWand1984Mode => (WAND_YEAR, Wand1984),
        W::NeutronaWand1989Mode => (WAND_YEAR, Wand1989),
        W::NeutronaWandAfterlifeMode => (WAND_YEAR, WandAfterlife),
        W::NeutronaWandFrozenEmpireMode => (WAND_YEAR, WandFrozenEmpire),
        W::NeutronaWandDefaultMode => (WAND_YEAR, WandDefaultMode),

        W::QuickVentEnabled => (QUICK_VENT, QuickVentEnabled),
        W::QuickVentDisabled => (QUICK_VENT, QuickVentDisabled),
        W::BootupErrorsEnabled => (BOOT_ERRORS, BootupErrorsEnabled),
        W::BootupErrorsDisabled => (BOOT_ERRORS, BootupErrorsDisabled),
        W::VentLightIntensityEnabled => (VENT_LIGHT, VentLightIntensityEnabled),
        W::VentLightIntensityDisabled => (VENT_LIGHT, VentLightIntensityDisabled),

        W::OverheatingEnabled => (OVERHEAT, OverheatEnabled),
        W::OverheatingDisabled => (OVERHEAT, OverheatDisabled),
        W::OverheatLevel1Enabled => (OVERHEAT_LEVELS, OverheatLevelEnabled(1)),
        W::OverheatLevel2Enabled => (OVERHEAT_LEVELS, OverheatLevelEnabled(2)),
        W::OverheatLevel3Enabled => (OVERHEAT_LEVELS, OverheatLevelEnabled(3)),
        W::OverheatLevel4Enabled => (OVERHEAT_LEVELS, OverheatLevelEnabled(4)),
        W::OverheatLevel5Enabled => (OVERHEAT_LEVELS, OverheatLevelEnabled(5)),
        W::OverheatLevel1Disabled => (OVERHEAT_LEVELS, OverheatLevelDisabled(1)),
        W::OverheatLevel2Disabled => (OVERHEAT_LEVELS, OverheatLevelDisabled(2)),
        W::OverheatLevel3Disabled => (OVERHEAT_LEVELS, OverheatLevelDisabled(3)),
        W::OverheatLevel4Disabled => (OVERHEAT_LEVELS, OverheatLevelDisabled(4)),
        W::OverheatLevel5Disabled => (OVERHEAT_LEVELS, OverheatLevelDisabled(5)),

        W::SoundOverheatSmokeDurationLevel1 => (SMOKE_DURATIONS, OverheatSmokeDuration(1)),
        W::SoundOverheatSmokeDurationLevel2 => (SMOKE_DURATIONS, OverheatSmokeDuration(2)),
        W::SoundOverheatSmokeDurationLevel3 => (SMOKE_DURATIONS, OverheatSmokeDuration(3)),
        W::SoundOverheatSmokeDurationLevel4 => (SMOKE_DURATIONS, OverheatSmokeDuration(4)),
        W::SoundOverheatSmokeDurationLevel5 => (SMOKE_DURATIONS, OverheatSmokeDuration(5)),
        W::SoundOverheatStartTimerLevel1 => (START_TIMERS, OverheatStartTimer(1)),
        W::SoundOverheatStartTimerLevel2 => (START_TIMERS, OverheatStartTimer(2)),
        W::SoundOverheatStartTimerLevel3 => (START_TIMERS, OverheatStartTimer(3)),
        W::SoundOverheatStartTimerLevel4 => (START_TIMERS, OverheatStartTimer(4)),
        W::SoundOverheatStartTimerLevel5 => (START_TIMERS, OverheatStartTimer(5)),
        W::SoundDefaultSystemVolumeAdjustment => (VOLUME_ADJUST, DefaultSystemVolumeAdjustment),

        W::BarrelLeds5 => (BARREL_LEDS, BarrelLed5),
        W::BarrelLeds48 => (BARREL_LEDS, BarrelLed48),
        W::BargraphInverted => (BARGRAPH, BargraphInverted),
        W::BargraphNotInverted => (BARGRAPH, BargraphNotInverted),
        W::DefaultBargraph => (BARGRAPH, DefaultBargraph),
        W::ModeOriginalBargraph => (BARGRAPH, ModeOriginalBargraph),
        W::SuperHeroBargraph => (BARGRAPH, SuperHeroBargraph),
        W::DefaultFiringAnimationsBargraph => (FIRING_ANIMATIONS, DefaultFiringAnimations),
        W::ModeOriginalFiringAnimationsBargraph => (FIRING_ANIMATIONS, ModeOriginalFiringAnimations),
        W::SuperHeroFiringAnimationsBargraph => (FIRING_ANIMATIONS, SuperHeroFiringAnimations),
        _ => return None,
    };
    Some(entry)
}

impl PackCore {
    pub(super) fn wand_prompt_command(&mut self, cmd: WandCommand) -> bool {
        match prompt_for(cmd) {
            Some((group, voice)) => {
                self.voice(group, voice);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, Audio, Cue, Sound};
    use crate::packet::Packet;
    use crate::protocol::Peer;

    #[test]
    fn every_prompt_voice_belongs_to_its_group() {
        for raw in 1..=u8::MAX {
            let Ok(cmd) = WandCommand::try_from(raw) else { continue };
            if let Some((group, voice)) = prompt_for(cmd) {
                assert!(group.contains(&voice), "{cmd:?}");
            }
        }
    }

    #[test]
    fn prompt_silences_group_then_speaks() {
        let mut core = PackCore::default();
        core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 0);
        let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::CtsAfterlife), 5);
        assert_eq!(out.len(), CTS.len() + 1);
        assert_eq!(
            out.last(),
            Some(&Action::Audio(Audio::Play(Cue::new(Sound::Voice(CtsAfterlife)))))
        );
    }
}
