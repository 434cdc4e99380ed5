//! Side effects the host performs on behalf of the core.
//!
//! The core owns no audio, LED, smoke or storage hardware. Every handler describes
//! what should happen as an ordered list of [`Action`]s; the host carries them out
//! in order.

use crate::packet::Packet;
use crate::protocol::Peer;

/// Action for host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Frame this packet (pack sentinels) and write it to the peer's link.
    Send(Peer, Packet),
    Audio(Audio),
    Lights(Lights),
    Smoke(Smoke),
    Store(Store),
    /// Pulse the pack vibration motor.
    Vibrate { ms: u16 },
    Power(Power),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audio {
    Play(Cue),
    Stop(Sound),
    /// Fade a playing effect to a new gain.
    AdjustGain { sound: Sound, gain: i16, fade_ms: u16 },
    /// Absolute channel gain in dB.
    ChannelGain { channel: Channel, gain: i16 },
    PlayMusic { track: u16, looped: bool },
    StopMusic,
    PauseMusic,
    ResumeMusic,
    /// Repeat the current track when it ends.
    SetMusicLoop(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Master,
    Effects,
    Music,
}

/// One `playEffect` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub sound: Sound,
    pub looped: bool,
    /// dB; `None` plays at the current effects gain.
    pub gain: Option<i16>,
    /// Fade-in length; 0 starts at full gain.
    pub fade_ms: u16,
    /// Cut off other instances of the same effect.
    pub exclusive: bool,
}

impl Cue {
    pub fn new(sound: Sound) -> Self {
        Self {
            sound,
            looped: false,
            gain: None,
            fade_ms: 0,
            exclusive: true,
        }
    }

    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }

    pub fn gain(mut self, gain: i16) -> Self {
        self.gain = Some(gain);
        self
    }

    pub fn fade_in(mut self, ms: u16) -> Self {
        self.fade_ms = ms;
        self
    }

    pub fn overlapping(mut self) -> Self {
        self.exclusive = false;
        self
    }
}

/// LED/animation requests. Rendering stays on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lights {
    /// Restart the cyclotron animation from its idle state.
    CyclotronReset,
    /// Recolour the cyclotron for the current stream mode.
    CyclotronColourReset,
    /// Redraw the power cell in the current stream colour.
    PowercellRedraw,
    /// Refresh the cyclotron switch panel indicators.
    SwitchPanelUpdate,
    InnerCyclotronReset,
    /// LED counts changed; recompute per-zone timing tables.
    LedCountsChanged,
    SpectralOn,
    SpectralOff,
    CyclotronSpeedIncrease,
    CyclotronSpeedRevert,
    Dimming { zone: DimZone, percent: u8 },
    OverheatStart,
    VentStart,
    OverheatFinished,
    FiringStart,
    FiringStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimZone {
    Cyclotron,
    InnerCyclotron,
    CyclotronPanel,
    Powercell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoke {
    /// Re-read the per-level continuous smoke flags.
    ResetContinuous,
    /// Run the smoke machine and fan for this long.
    Start { ms: u64 },
    Stop,
}

/// Persistence entry points. Only ever emitted by explicit save/clear commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    SaveConfig,
    SaveLeds,
    ClearConfig,
    ClearLeds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    /// Run the pack boot-up sequence.
    Activate,
    /// Run the pack shutdown sequence.
    Shutdown,
}

/// Effect identifiers understood by the host's audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    // Interface beeps and clicks.
    Beeps,
    BeepsAlt,
    BeepsBargraph,
    BeepsLow,
    Beep8,
    Click,
    WandSync,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    // Pack mechanics.
    VentDry,
    VentSmoke,
    VentOpen,
    PackPreVent,
    PackOverheatHot,
    PackBeepsOverheat,
    QuickVentOpen,
    QuickVentClose,
    SlimeEmpty,
    AfterlifePackStartup,
    AfterlifePackIdleLoop,
    // Stream mode ambience.
    FireStartSpark,
    PackSlimeOpen,
    PackSlimeTankLoop,
    StasisOpen,
    StasisIdleLoop,
    MesonOpen,
    MesonIdleLoop,
    // Firing loops and tails.
    Gb1FireLoopPack,
    Gb1FireLoopGun,
    Gb2FireLoop,
    AfterlifeFireLoop,
    FrozenEmpireFireLoop,
    FiringLoopGb1,
    Gb1FireHighPowerLoop,
    Gb1984FireHighPowerLoop,
    FiringEnd,
    FiringEndMid,
    FiringEndGun,
    Gb1984FireEndShort,
    Gb1984FireEndHighPower,
    AfterlifeFireEndShort,
    AfterlifeFireEndMid,
    AfterlifeFireEndLong,
    FrozenEmpireFireEnd,
    SlimeEnd,
    StasisEnd,
    CrossStreamsStart,
    CrossStreamsEnd,
    AfterlifeCrossTheStreamsStart,
    AfterlifeCrossTheStreamsEnd,
    SmashErrorLoop,
    SmashErrorRestart,
    // Wand sounds mirrored on the pack.
    AfterlifeBeepWand,
    WandHeatdown,
    WandHeatupAlt,
    WandShutdown,
    WandMashError,
    WandBootup,
    WandBootupShort,
    Gb2WandStart,
    AfterlifeWandBarrelExtend,
    AfterlifeWandIdle1,
    AfterlifeWandIdle2,
    AfterlifeWandRamp1,
    AfterlifeWandRamp2,
    AfterlifeWandRamp2FadeIn,
    AfterlifeWandRampDown1,
    AfterlifeWandRampDown2,
    AfterlifeWandRampDown2FadeOut,
    BosonDartFire,
    ShockBlastFire,
    SlimeTetherFire,
    MesonColliderFire,
    MesonFirePulse,
    // Voice prompts.
    Voice(Voice),
    /// Raw effect number passed through from the wand.
    Effect(u16),
}

/// Spoken menu prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    Era1984,
    Era1989,
    Afterlife,
    FrozenEmpire,
    YearModeDefault,
    ModeSuperHero,
    ModeOriginal,
    EepromSave,
    EepromErase,
    EepromLedMenu,
    EepromConfigMenu,
    BargraphOverheatBlinkEnabled,
    BargraphOverheatBlinkDisabled,
    WandBeepingEnabled,
    WandBeepingDisabled,
    WandSoundsEnabled,
    WandSoundsDisabled,
    WandSpeakerAmpEnabled,
    WandSpeakerAmpDisabled,
    WandVibrationEnabled,
    WandVibrationFiringEnabled,
    WandVibrationDisabled,
    WandVibrationDefault,
    PackVibrationEnabled,
    PackVibrationFiringEnabled,
    PackVibrationDisabled,
    PackVibrationDefault,
    Cts1984,
    Cts1989,
    CtsAfterlife,
    CtsFrozenEmpire,
    CtsDefault,
    Wand1984,
    Wand1989,
    WandAfterlife,
    WandFrozenEmpire,
    WandDefaultMode,
    VideoGameModes,
    CrossTheStreams,
    CrossTheStreamsMix,
    SpectralModesEnabled,
    SpectralModesDisabled,
    OverheatEnabled,
    OverheatDisabled,
    OverheatLevelEnabled(u8),
    OverheatLevelDisabled(u8),
    OverheatSmokeDuration(u8),
    OverheatStartTimer(u8),
    ContinuousSmokeEnabled(u8),
    ContinuousSmokeDisabled(u8),
    SmokeEnabled,
    SmokeDisabled,
    QuickVentEnabled,
    QuickVentDisabled,
    BootupErrorsEnabled,
    BootupErrorsDisabled,
    VentLightIntensityEnabled,
    VentLightIntensityDisabled,
    DefaultSystemVolumeAdjustment,
    BarrelLed5,
    BarrelLed48,
    BargraphInverted,
    BargraphNotInverted,
    DefaultBargraph,
    ModeOriginalBargraph,
    SuperHeroBargraph,
    DefaultFiringAnimations,
    ModeOriginalFiringAnimations,
    SuperHeroFiringAnimations,
    ProtonMixEffectsEnabled,
    ProtonMixEffectsDisabled,
    DemoLightModeEnabled,
    DemoLightModeDisabled,
    OverheatStrobeEnabled,
    OverheatStrobeDisabled,
    OverheatLightsOffEnabled,
    OverheatLightsOffDisabled,
    OverheatFanSyncEnabled,
    OverheatFanSyncDisabled,
    CyclotronSimulateRingEnabled,
    CyclotronSimulateRingDisabled,
    InnerCyclotronPanelEnabled,
    InnerCyclotronPanelDisabled,
    CyclotronClockwise,
    CyclotronCounterClockwise,
    SingleLed,
    ThreeLed,
    VideoGameColoursEnabled,
    VideoGameColoursDisabled,
    VideoGameColoursPowercellEnabled,
    VideoGameColoursCyclotronEnabled,
    CyclotronBrightness,
    InnerCyclotronBrightness,
    InnerCyclotronPanelBrightness,
    PowercellBrightness,
    InnerCyclotron(u8),
    Powercell(u8),
    Cyclotron(u8),
    RgbInnerCyclotron,
    GrbInnerCyclotron,
}

impl From<Voice> for Sound {
    fn from(v: Voice) -> Self {
        Sound::Voice(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_builder_sets_fields() {
        let cue = Cue::new(Sound::PackSlimeTankLoop)
            .looped()
            .gain(0)
            .fade_in(900);
        assert!(cue.looped);
        assert_eq!(cue.gain, Some(0));
        assert_eq!(cue.fade_ms, 900);
        assert!(cue.exclusive);
        assert!(!Cue::new(Sound::BosonDartFire).overlapping().exclusive);
    }

    #[test]
    fn voice_converts_into_sound() {
        let s: Sound = Voice::EepromSave.into();
        assert_eq!(s, Sound::Voice(Voice::EepromSave));
    }
}
