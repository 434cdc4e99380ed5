//! Serial link vocabulary: packet kinds, sender roles and their sentinels, opcodes.

/// Kind tag carried by every frame; selects the decode shape of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketKind {
    Command = 1,
    Message = 2,
    PackPrefs = 3,
    WandPrefs = 4,
    SmokePrefs = 5,
    Sync = 6,
}

impl PacketKind {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Command),
            2 => Some(Self::Message),
            3 => Some(Self::PackPrefs),
            4 => Some(Self::WandPrefs),
            5 => Some(Self::SmokePrefs),
            6 => Some(Self::Sync),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Controller that originated a frame. Each role stamps its own sentinel pair so a
/// receiver wired to the wrong port rejects everything it hears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Pack,
    Wand,
    Serial1,
}

/// Start/end marker bytes for one sending role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinels {
    pub start: u8,
    pub end: u8,
}

impl Role {
    pub const fn sentinels(self) -> Sentinels {
        match self {
            Role::Pack => Sentinels { start: 0xA1, end: 0xA2 },
            Role::Wand => Sentinels { start: 0xB1, end: 0xB2 },
            Role::Serial1 => Sentinels { start: 0xC1, end: 0xC2 },
        }
    }
}

/// Peer as seen from the pack: which link a packet arrived on or is bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peer {
    Wand,
    Serial1,
}

impl Peer {
    /// Role whose sentinels frames from this peer must carry.
    pub fn role(self) -> Role {
        match self {
            Peer::Wand => Role::Wand,
            Peer::Serial1 => Role::Serial1,
        }
    }
}

/// Opcode byte not known to this build. Dispatch treats it as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode {0}")]
pub struct UnknownOpcode(pub u8);

macro_rules! opcodes {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $value,)*
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownOpcode;

            fn try_from(raw: u8) -> Result<Self, Self::Error> {
                match raw {
                    $($value => Ok(Self::$variant),)*
                    other => Err(UnknownOpcode(other)),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(op: $name) -> u8 {
                op as u8
            }
        }
    };
}

opcodes! {
    /// Commands the wand sends to the pack.
    WandCommand {
        // Link and synchronization.
        SyncNow = 1,
        Handshake = 2,
        Synchronized = 3,

        // Power, barrel and menu echoes.
        On = 4,
        Off = 5,
        BarrelExtended = 6,
        BarrelRetracted = 7,
        BargraphOverheatBlinkEnabled = 8,
        BargraphOverheatBlinkDisabled = 9,
        ModeBeepLoopEnabled = 10,
        ModeBeepLoopDisabled = 11,
        CyclotronSimulateRingToggle = 12,
        VoiceNeutronaWandSoundsEnabled = 13,
        VoiceNeutronaWandSoundsDisabled = 14,

        // Wand sounds mirrored on the pack.
        WandBeep = 15,
        WandBeepStart = 16,
        WandBeepStop = 17,
        WandBeepStopLoop = 18,
        BeepsAlt = 19,
        ModeOriginalHeatdown = 20,
        ModeOriginalHeatdownStop = 21,
        ModeOriginalHeatupStop = 22,
        ModeOriginalHeatup = 23,
        WandBeepBargraph = 24,
        WandBeepSounds = 25,
        WandShutdownSound = 26,
        WandMashErrorSound = 27,
        WandBootupSound = 28,
        WandBootupShortSound = 29,
        WandBootup1989 = 30,
        AfterlifeWandBarrelExtend = 31,
        AfterlifeRampLoopStop = 32,
        AfterlifeRampLoop2Stop = 33,
        AfterlifeGunRamp1 = 34,
        AfterlifeGunRamp2 = 35,
        AfterlifeGunRamp2FadeIn = 36,
        AfterlifeGunLoop1 = 37,
        AfterlifeGunLoop2 = 38,
        AfterlifeGunRampDown2 = 39,
        AfterlifeGunRampDown2FadeOut = 40,
        AfterlifeGunRampDown1 = 41,
        ExtraWandSoundsStop = 42,
        BosonDartSound = 43,
        ShockBlastSound = 44,
        SlimeTetherSound = 45,
        MesonColliderSound = 46,
        MesonFirePulse = 47,

        // Firing and lockout.
        Firing = 48,
        FiringStopped = 49,
        ButtonMashing = 50,
        SmashErrorLoop = 51,
        SmashErrorLoopStop = 52,
        SmashErrorRestart = 53,

        // Stream modes.
        ProtonMode = 54,
        SlimeMode = 55,
        StasisMode = 56,
        MesonMode = 57,
        SpectralMode = 58,
        HolidayMode = 59,
        SpectralCustomMode = 60,
        SettingsMode = 61,
        ToggleInnerCyclotronPanel = 62,

        // Overheat and venting.
        Overheating = 63,
        Venting = 64,
        OverheatingFinished = 65,
        CyclotronNormalSpeed = 66,
        CyclotronIncreaseSpeed = 67,
        BeepStart = 68,

        // Power levels and overheat thresholds.
        PowerLevel1 = 69,
        PowerLevel2 = 70,
        PowerLevel3 = 71,
        PowerLevel4 = 72,
        PowerLevel5 = 73,
        OverheatIncreaseLevel1 = 74,
        OverheatIncreaseLevel2 = 75,
        OverheatIncreaseLevel3 = 76,
        OverheatIncreaseLevel4 = 77,
        OverheatIncreaseLevel5 = 78,
        OverheatDecreaseLevel1 = 79,
        OverheatDecreaseLevel2 = 80,
        OverheatDecreaseLevel3 = 81,
        OverheatDecreaseLevel4 = 82,
        OverheatDecreaseLevel5 = 83,

        // Firing mixes and crossing the streams.
        FiringIntensify = 84,
        FiringIntensifyMix = 85,
        FiringIntensifyStopped = 86,
        FiringIntensifyStoppedMix = 87,
        FiringAlt = 88,
        FiringAltMix = 89,
        FiringAltStopped = 90,
        FiringAltStoppedMix = 91,
        FiringCrossingTheStreams1984 = 92,
        FiringCrossingTheStreams2021 = 93,
        FiringCrossingTheStreamsMix1984 = 94,
        FiringCrossingTheStreamsMix2021 = 95,
        FiringCrossingTheStreamsStopped1984 = 96,
        FiringCrossingTheStreamsStopped2021 = 97,
        FiringCrossingTheStreamsStoppedMix1984 = 98,
        FiringCrossingTheStreamsStoppedMix2021 = 99,

        // Menu settings.
        YearModesCycle = 100,
        VideoGameMode = 101,
        CrossTheStreams = 102,
        CrossTheStreamsMix = 103,
        SpectralModesEnabled = 104,
        SpectralModesDisabled = 105,
        SoundNeutronaWandSpeakerAmpEnabled = 106,
        SoundNeutronaWandSpeakerAmpDisabled = 107,
        VibrationDisabled = 108,
        VibrationEnabled = 109,
        VibrationFiringEnabled = 110,
        VibrationDefault = 111,
        VibrationCycleToggle = 112,
        VibrationCycleToggleEeprom = 113,
        SmokeToggle = 114,
        CyclotronDirectionToggle = 115,
        CyclotronLedToggle = 116,
        VideoGameModeColourToggle = 117,
        OverheatingDisabled = 118,
        OverheatingEnabled = 119,
        MenuLevel1 = 120,
        MenuLevel2 = 121,
        MenuLevel3 = 122,
        MenuLevel4 = 123,
        MenuLevel5 = 124,

        // Volume and music.
        VolumeMusicDecrease = 125,
        VolumeMusicIncrease = 126,
        VolumeSoundEffectsDecrease = 127,
        VolumeSoundEffectsIncrease = 128,
        MusicTrackLoopToggle = 129,
        SilentMode = 130,
        VolumeRevert = 131,
        VolumeDecrease = 132,
        VolumeIncrease = 133,
        MusicStop = 134,
        MusicStart = 135,
        SoundOverheatSmokeDurationLevel5 = 136,
        SoundOverheatSmokeDurationLevel4 = 137,
        VolumeDecreaseEeprom = 138,
        VolumeIncreaseEeprom = 139,
        SoundOverheatSmokeDurationLevel3 = 140,
        SoundOverheatSmokeDurationLevel2 = 141,
        SoundOverheatSmokeDurationLevel1 = 142,
        SoundOverheatStartTimerLevel5 = 143,
        SoundOverheatStartTimerLevel4 = 144,
        SoundOverheatStartTimerLevel3 = 145,
        SoundOverheatStartTimerLevel2 = 146,
        SoundOverheatStartTimerLevel1 = 147,
        SoundDefaultSystemVolumeAdjustment = 148,
        ProtonStreamImpactToggle = 149,
        Cts1984 = 150,
        Cts1989 = 151,
        CtsAfterlife = 152,
        CtsFrozenEmpire = 153,
        CtsDefault = 154,
        ModeToggle = 155,

        // Spectral customisation and LED configuration.
        SpectralLightsOn = 156,
        SpectralLightsOff = 157,
        SpectralInnerCyclotronCustomDecrease = 158,
        SpectralCyclotronCustomDecrease = 159,
        SpectralPowercellCustomDecrease = 160,
        SpectralPowercellCustomIncrease = 161,
        SpectralCyclotronCustomIncrease = 162,
        SpectralInnerCyclotronCustomIncrease = 163,
        DimmingToggle = 164,
        DimmingIncrease = 165,
        DimmingDecrease = 166,

        // Storage, LED counts and menu echoes.
        ClearConfigEepromSettings = 167,
        SaveConfigEepromSettings = 168,
        ClearLedEepromSettings = 169,
        SaveLedEepromSettings = 170,
        ToggleInnerCyclotronLeds = 171,
        TogglePowercellLeds = 172,
        ToggleCyclotronLeds = 173,
        ToggleRgbInnerCyclotronLeds = 174,
        EepromLedMenu = 175,
        EepromConfigMenu = 176,
        QuickVentDisabled = 177,
        QuickVentEnabled = 178,
        BootupErrorsDisabled = 179,
        BootupErrorsEnabled = 180,
        VentLightIntensityEnabled = 181,
        VentLightIntensityDisabled = 182,
        DemoLightModeToggle = 183,
        OverheatLevel5Enabled = 184,
        OverheatLevel4Enabled = 185,
        OverheatLevel3Enabled = 186,
        OverheatLevel2Enabled = 187,
        OverheatLevel1Enabled = 188,
        OverheatLevel5Disabled = 189,
        OverheatLevel4Disabled = 190,
        OverheatLevel3Disabled = 191,
        OverheatLevel2Disabled = 192,
        OverheatLevel1Disabled = 193,
        ContinuousSmokeToggle5 = 194,
        ContinuousSmokeToggle4 = 195,
        ContinuousSmokeToggle3 = 196,
        ContinuousSmokeToggle2 = 197,
        ContinuousSmokeToggle1 = 198,
        BarrelLeds5 = 199,
        BarrelLeds48 = 200,
        BargraphInverted = 201,
        BargraphNotInverted = 202,
        DefaultBargraph = 203,
        ModeOriginalBargraph = 204,
        SuperHeroBargraph = 205,
        SuperHeroFiringAnimationsBargraph = 206,
        ModeOriginalFiringAnimationsBargraph = 207,
        DefaultFiringAnimationsBargraph = 208,
        NeutronaWand1984Mode = 209,
        NeutronaWand1989Mode = 210,
        NeutronaWandAfterlifeMode = 211,
        NeutronaWandFrozenEmpireMode = 212,
        NeutronaWandDefaultMode = 213,
        OverheatStrobeToggle = 214,
        OverheatLightsOffToggle = 215,
        OverheatSyncToFanToggle = 216,

        // Persisted defaults, track control and raw sounds.
        YearModesCycleEeprom = 217,
        MusicNextTrack = 218,
        MusicPrevTrack = 219,
        MusicPlayTrack = 220,
        ComSoundNumber = 221,
    }
}

opcodes! {
    /// Commands the pack sends to the wand.
    PackCommand {
        // Synchronization.
        SyncStart = 1,
        SyncEnd = 2,
        AlarmOn = 3,

        // Operating mode and era.
        ModeSuperHero = 10,
        ModeOriginal = 11,
        ModeOriginalRedSwitchOn = 12,
        ModeOriginalRedSwitchOff = 13,
        SoundSuperHero = 14,
        SoundModeOriginal = 15,
        Mode1984 = 16,
        Mode1989 = 17,
        ModeAfterlife = 18,
        ModeFrozenEmpire = 19,
        Year1984 = 20,
        Year1989 = 21,
        YearAfterlife = 22,
        YearFrozenEmpire = 23,
        YearModeDefault = 24,

        // Overheat forwarding and firing lockout.
        WarningCancelled = 30,
        ManualOverheat = 31,
        FiringLockout = 32,
        FiringLockoutCleared = 33,

        // Volume.
        MasterAudioNormal = 40,
        MasterAudioSilentMode = 41,
        VolumeDecrease = 42,
        VolumeIncrease = 43,
        VolumeSoundEffectsDecrease = 44,
        VolumeSoundEffectsIncrease = 45,
        VolumeMusicDecrease = 46,
        VolumeMusicIncrease = 47,
        VolumeSync = 48,

        // Music.
        MusicStart = 50,
        MusicStop = 51,
        MusicPause = 52,
        MusicResume = 53,
        MusicPlayTrack = 54,
        MusicRepeat = 55,
        MusicNoRepeat = 56,

        // Preference transfer.
        SendPreferencesWand = 60,
        SendPreferencesSmoke = 61,
        SaveEepromWand = 62,

        // Pack settings echoed to the wand.
        VibrationEnabled = 70,
        VibrationDisabled = 71,
        PackVibrationEnabled = 72,
        PackVibrationFiringEnabled = 73,
        PackVibrationDisabled = 74,
        PackVibrationDefault = 75,
        SmokeEnabled = 76,
        SmokeDisabled = 77,
        ContinuousSmoke1Enabled = 78,
        ContinuousSmoke1Disabled = 79,
        ContinuousSmoke2Enabled = 80,
        ContinuousSmoke2Disabled = 81,
        ContinuousSmoke3Enabled = 82,
        ContinuousSmoke3Disabled = 83,
        ContinuousSmoke4Enabled = 84,
        ContinuousSmoke4Disabled = 85,
        ContinuousSmoke5Enabled = 86,
        ContinuousSmoke5Disabled = 87,
        ProtonStreamImpactEnabled = 88,
        ProtonStreamImpactDisabled = 89,
        DemoLightModeEnabled = 90,
        DemoLightModeDisabled = 91,
        OverheatStrobeEnabled = 92,
        OverheatStrobeDisabled = 93,
        OverheatLightsOffEnabled = 94,
        OverheatLightsOffDisabled = 95,
        OverheatSyncFanEnabled = 96,
        OverheatSyncFanDisabled = 97,

        // LED configuration echoed to the wand.
        CyclotronClockwise = 110,
        CyclotronCounterClockwise = 111,
        CyclotronSingleLed = 112,
        CyclotronThreeLed = 113,
        CyclotronSimulateRingEnabled = 114,
        CyclotronSimulateRingDisabled = 115,
        ToggleInnerCyclotronPanelEnabled = 116,
        ToggleInnerCyclotronPanelDisabled = 117,
        VideoGameModeColoursEnabled = 118,
        VideoGameModeColoursDisabled = 119,
        VideoGameModePowerCellEnabled = 120,
        VideoGameModeCyclotronEnabled = 121,
        CyclotronDimming = 122,
        InnerCyclotronDimming = 123,
        CyclotronPanelDimming = 124,
        PowercellDimming = 125,
        Dimming = 126,
        InnerCyclotronLeds12 = 127,
        InnerCyclotronLeds23 = 128,
        InnerCyclotronLeds24 = 129,
        InnerCyclotronLeds26 = 130,
        InnerCyclotronLeds35 = 131,
        InnerCyclotronLeds36 = 132,
        PowercellLeds13 = 133,
        PowercellLeds15 = 134,
        CyclotronLeds12 = 135,
        CyclotronLeds20 = 136,
        CyclotronLeds36 = 137,
        CyclotronLeds40 = 138,
        RgbInnerCyclotronLeds = 139,
        GrbInnerCyclotronLeds = 140,
    }
}

opcodes! {
    /// Commands exchanged with the serial1 device (attenuator or wireless bridge), both directions.
    SerialCommand {
        // Synchronization and liveness.
        Handshake = 1,
        SyncStart = 2,
        SyncEnd = 3,
        PackConnected = 4,
        WandConnected = 5,
        WandDisconnected = 6,

        // Requests from the serial1 device.
        TurnPackOn = 10,
        TurnPackOff = 11,
        WarningCancelled = 12,
        ManualOverheat = 13,
        ToggleMute = 14,
        VolumeDecrease = 15,
        VolumeIncrease = 16,
        VolumeSoundEffectsDecrease = 17,
        VolumeSoundEffectsIncrease = 18,
        VolumeMusicDecrease = 19,
        VolumeMusicIncrease = 20,
        MusicStartStop = 21,
        MusicPauseResume = 22,
        MusicNextTrack = 23,
        MusicPrevTrack = 24,
        MusicPlayTrack = 25,
        RequestPreferencesPack = 26,
        RequestPreferencesWand = 27,
        RequestPreferencesSmoke = 28,
        SaveEepromSettingsPack = 29,
        SaveEepromSettingsWand = 30,

        // Pack status reports.
        ModeSuperHero = 40,
        ModeOriginal = 41,
        ModeOriginalRedSwitchOn = 42,
        ModeOriginalRedSwitchOff = 43,
        Year1984 = 44,
        Year1989 = 45,
        YearAfterlife = 46,
        YearFrozenEmpire = 47,
        AlarmOn = 48,
        PackOn = 49,
        PackOff = 50,
        WandOn = 51,
        WandOff = 52,
        PowerLevel1 = 53,
        PowerLevel2 = 54,
        PowerLevel3 = 55,
        PowerLevel4 = 56,
        PowerLevel5 = 57,
        ProtonMode = 58,
        SlimeMode = 59,
        StasisMode = 60,
        MesonMode = 61,
        SpectralMode = 62,
        HolidayMode = 63,
        SpectralCustomMode = 64,
        SettingsMode = 65,
        SpectralColourData = 66,
        BarrelExtended = 67,
        BarrelRetracted = 68,
        CyclotronLidOn = 69,
        CyclotronLidOff = 70,
        Firing = 71,
        FiringStopped = 72,
        Overheating = 73,
        Venting = 74,
        OverheatingFinished = 75,
        CyclotronNormalSpeed = 76,
        CyclotronIncreaseSpeed = 77,

        // Music and volume status.
        MusicIsPlaying = 80,
        MusicIsNotPlaying = 81,
        MusicIsPaused = 82,
        MusicIsNotPaused = 83,
        MusicTrackCountSync = 84,
        MusicRepeat = 85,
        MusicNoRepeat = 86,
        VolumeSync = 87,

    }
}

impl WandCommand {
    /// Commands honoured while the wand link is not connected.
    pub fn is_link_control(self) -> bool {
        matches!(
            self,
            WandCommand::SyncNow | WandCommand::Handshake | WandCommand::Synchronized
        )
    }

    /// Commands rejected while the mash lockout is active.
    pub fn is_firing(self) -> bool {
        use WandCommand::*;
        matches!(
            self,
            Firing
                | FiringIntensify
                | FiringIntensifyMix
                | FiringAlt
                | FiringAltMix
                | FiringCrossingTheStreams1984
                | FiringCrossingTheStreams2021
                | FiringCrossingTheStreamsMix1984
                | FiringCrossingTheStreamsMix2021
        )
    }
}
