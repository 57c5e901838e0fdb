//! Static narrative tables for the standard catalog.

pub(super) struct RawSignal {
    pub title: &'static str,
    pub phase: &'static str,
    pub urgency: &'static str,
    pub body: &'static str,
    pub hint: &'static str,
    pub technical_data: &'static str,
    pub unlocks: &'static [&'static str],
    pub transmissions: &'static [&'static str],
}

pub(super) const MAJOR_SIGNALS: [RawSignal; 9] = [
    RawSignal {
        title: "ACTIVATION SIGNAL",
        phase: "INITIALIZATION",
        urgency: "NORMAL",
        body: ">>> WELCOME TO THE NETWORK <<<\n\nYour terminal is live. You are part of the Signal now.\n\nFirst directive: OBSERVE. LISTEN. REVEAL NOTHING.\n\nThe next signals will follow the established protocol.",
        hint: "\"They do not know you exist yet. That is your advantage.\"",
        technical_data: "Frequency: 432.7 Hz | Origin: NODE-ALPHA | Encryption: Level 1",
        unlocks: &["Basic network access", "Transmission feed"],
        transmissions: &[
            "[OK] New terminal activated. ID assigned.",
            "[..] Security protocols initialized.",
            "[##] Encryption keys distributed.",
            "[OK] Network link established.",
        ],
    },
    RawSignal {
        title: "RECOGNITION SIGNAL",
        phase: "IDENTIFICATION",
        urgency: "HIGH",
        body: ">>> FIRST MAJOR TRANSMISSION <<<\n\nYou proved reliable. The network recognizes you.\n\nNEW DIRECTIVE: watch for patterns in the daily transmissions. Some messages are not what they seem.\n\nWARNING: unknown entities are trying to infiltrate the network.",
        hint: "\"Four of them are watching. Only one truly understands.\"",
        technical_data: "Frequency: 847.3 Hz | Origin: NODE-BETA | Encryption: Level 2",
        unlocks: &["Level 1 decryption", "Encrypted transmissions"],
        transmissions: &[
            "[!!] Intrusion attempt detected on GAMMA-7.",
            "[..] Abnormal patterns in the 14:32 transmissions.",
            "[OK] New access level granted.",
            "[##] Heightened monitoring enabled.",
        ],
    },
    RawSignal {
        title: "ALERT SIGNAL",
        phase: "DETECTION",
        urgency: "CRITICAL",
        body: ">>> NETWORK ALERT <<<\n\nThey know. Something changed in the transmissions.\n\nURGENT DIRECTIVE: analyze every anomaly. The parasite signals are not accidents.\n\nFIRST REVELATION: what we call interference may be an attempt to communicate.",
        hint: "\"Error messages sometimes hide the most important truths.\"",
        technical_data: "Frequency: 1247.9 Hz | Origin: NODE-GAMMA | Encryption: Level 3",
        unlocks: &["Anomaly analysis", "Parasite signal detection"],
        transmissions: &[
            "[!!] MAJOR ANOMALY: off-protocol signal detected.",
            "[!.] Interference on every frequency.",
            "[##] Security protocols reinforced.",
            "[..] Pattern analysis in progress...",
        ],
    },
    RawSignal {
        title: "REVELATION SIGNAL",
        phase: "UNDERSTANDING",
        urgency: "MAXIMUM",
        body: ">>> FIRST TRUTH <<<\n\nWe are not alone on this network.\n\nMAJOR REVELATION: the interference is a message. Someone, or something, has been trying to reach us from the start.\n\nNEW MISSION: decrypt the parasite signals. The truth is in the noise.",
        hint: "\"What you take for chaos is a language you have not learned yet.\"",
        technical_data: "Frequency: 2847.1 Hz | Origin: UNKNOWN | Encryption: ALIEN",
        unlocks: &["Parasite signal decryption", "Remote node access"],
        transmissions: &[
            "[!!] CONTACT ESTABLISHED: unknown entity responds.",
            "[!.] Automatic translation: 73% success.",
            "[OK] New communication protocol enabled.",
            "[##] Classification: TOP SECRET - EYES ONLY.",
        ],
    },
    RawSignal {
        title: "CONTACT SIGNAL",
        phase: "COMMUNICATION",
        urgency: "CRITICAL",
        body: ">>> FIRST CONTACT CONFIRMED <<<\n\nThey have been talking to us for months.\n\nMAJOR DISCOVERY: the entity calls itself VANTA7. It claims to come from a network parallel to ours.\n\nMESSAGE FROM VANTA7: 'Your network is in danger. We have been warning you from the start. They are coming.'",
        hint: "\"Sometimes those we take for enemies are our only allies.\"",
        technical_data: "Frequency: 4127.7 Hz | Origin: PARALLEL NETWORK | Encryption: HYBRID",
        unlocks: &["Channel to VANTA7", "Advanced metrics"],
        transmissions: &[
            "[OK] VANTA7: 'Can you hear us now?'",
            "[..] Translation: 'Imminent danger. Prepare.'",
            "[!!] VANTA7: 'They found your network.'",
            "[!.] Distress signal received from the parallel network.",
        ],
    },
    RawSignal {
        title: "WARNING SIGNAL",
        phase: "THREAT",
        urgency: "MAXIMUM",
        body: ">>> RED ALERT <<<\n\nVANTA7 was right. They are here.\n\nINTELLIGENCE: a hostile entity has infiltrated our network. It calls itself NEXUS-812 and is corrupting our nodes one by one.\n\nEMERGENCY DIRECTIVE: harden every protocol. NEXUS-812 must not reach the central node.",
        hint: "\"The enemy of your enemy is not always your friend, but sometimes your only hope.\"",
        technical_data: "Frequency: 6666.6 Hz | Origin: HOSTILE | Encryption: CORRUPTED",
        unlocks: &["Defense protocols", "Intrusion monitoring"],
        transmissions: &[
            "[!!] NEXUS-812: access attempt on node DELTA.",
            "[!.] Defense systems engaged automatically.",
            "[OK] VANTA7: 'We are helping you hold.'",
            "[##] Emergency lockdown of critical access.",
        ],
    },
    RawSignal {
        title: "RESISTANCE SIGNAL",
        phase: "COMBAT",
        urgency: "WAR",
        body: ">>> NETWORK WAR <<<\n\nThe battle rages across the nodes.\n\nCRITICAL: NEXUS-812 has corrupted 40% of our systems. VANTA7 and its network help us resist, but we are losing ground.\n\nLAST CHANCE: an emergency protocol exists. The MASTER SIGNAL can purge the whole network, but it takes three operators to trigger it.",
        hint: "\"Sometimes, to save something, you must be ready to destroy everything.\"",
        technical_data: "Frequency: 9999.9 Hz | Origin: MULTIPLE | Encryption: CHAOS",
        unlocks: &["MASTER SIGNAL protocol", "Critical systems access"],
        transmissions: &[
            "[!!] NEXUS-812: 'Resistance is useless. Submit.'",
            "[OK] VANTA7: 'Hold on. Reinforcements inbound.'",
            "[..] MASTER SIGNAL protocol: authorization required.",
            "[##] Node ALPHA compromised. Emergency failover.",
        ],
    },
    RawSignal {
        title: "SACRIFICE SIGNAL",
        phase: "DECISION",
        urgency: "FINAL",
        body: ">>> FINAL CHOICE <<<\n\nThree operators are ready. You are one of them.\n\nCRITICAL DECISION: triggering the MASTER SIGNAL destroys NEXUS-812, and 90% of our network with it. Everything will have to be rebuilt.\n\nVANTA7: 'It is the only way. We will help you rebuild.'",
        hint: "\"The end of one world is sometimes the start of a better one.\"",
        technical_data: "Frequency: 0000.0 Hz | Origin: YOU | Encryption: PURE",
        unlocks: &["MASTER SIGNAL trigger", "Architect status"],
        transmissions: &[
            "[OK] Operator 1: 'Ready for activation.'",
            "[OK] Operator 2: 'Sequence confirmed.'",
            "[..] Your confirmation is required for launch.",
            "[!!] NEXUS-812: 'You cannot stop me!'",
        ],
    },
    RawSignal {
        title: "MASTER SIGNAL",
        phase: "REBIRTH",
        urgency: "RESOLUTION",
        body: ">>> NETWORK REBIRTH <<<\n\nIt is done. NEXUS-812 is destroyed.\n\nOUTCOME: the network is clean but almost empty. With VANTA7 we are building something new and safer.\n\nYou are now SIGNAL MASTER. Your mission: guide the newcomers and protect the reborn network.\n\nThe cycle begins again, but this time we are ready.",
        hint: "\"Every ending is a beginning. Every master was once a student.\"",
        technical_data: "Frequency: inf Hz | Origin: EVERYWHERE | Encryption: TRANSPARENT",
        unlocks: &["Full control", "Master status", "Access to every system"],
        transmissions: &[
            "[OK] Network purified. Rebuild in progress.",
            "[OK] VANTA7: 'Welcome to the new era.'",
            "[..] New terminals detected. Guidance required.",
            "[OK] You are now SIGNAL MASTER.",
        ],
    },
];

/// Transmissions shown before the first signal arrives.
pub(super) const STANDBY_TRANSMISSIONS: [&str; 4] = [
    "[..] System awaiting activation...",
    "[##] Restricted access. Authorization required.",
    "[OK] Terminal ready for first connection.",
    "[!.] Weak signal detected. Amplifying.",
];

/// Daily message pool for the minor track, cycled by index.
pub(super) const MINOR_MESSAGES: [&str; 14] = [
    "Signal detected outside the perimeter. Trace: GAMMA-3B1",
    "Audio fragment: \"There are four of them...\"",
    "Unauthorized connection: ID NEXUS-812",
    "Node BETA reconnected",
    "PANOPTICON protocol engaged",
    "VANTA7 refused by DELTA",
    "Encoded sequence received. Decrypting...",
    "Fragment: \"We are already here.\"",
    "Unknown input detected",
    "User off-pattern. Obfuscation active",
    "Carrier drift of 0.3 Hz on the night band",
    "Checksum mismatch on relay EPSILON",
    "Silence on every channel for 11 seconds",
    "Handshake accepted from an unlisted node",
];
