//! Built-in key sequence tables, one per terminal family.

/// Key sequences for one family of terminals.
#[derive(Debug)]
pub(crate) struct Family {
    pub(crate) name: &'static str,
    keys: &'static [(&'static str, &'static [u8])],
}

impl Family {
    pub(crate) fn sequence(&self, name: &str) -> Option<&'static [u8]> {
        self.keys
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, seq)| *seq)
    }
}

/// Select the family for a terminal name.
///
/// Matching is by substring, the way real terminals advertise themselves
/// (`xterm-256color`, `screen.xterm-256color`, `rxvt-unicode-256color`).
pub(crate) fn family_for(term: &str) -> Option<&'static Family> {
    if term.contains("rxvt") {
        Some(&RXVT)
    } else if term.contains("xterm")
        || term.contains("256color")
        || term.contains("screen")
        || term.contains("tmux")
    {
        Some(&XTERM)
    } else if term.contains("linux") {
        Some(&LINUX)
    } else if term.contains("vt100") || term.contains("vt102") || term.contains("vt220") {
        Some(&VT100)
    } else if term.contains("ansi") {
        Some(&ANSI)
    } else {
        None
    }
}

static XTERM: Family = Family {
    name: "xterm",
    keys: &[
        ("key_b2", b"\x1bOE"),
        ("key_backspace", b"\x7f"),
        ("key_btab", b"\x1b[Z"),
        ("key_dc", b"\x1b[3~"),
        ("key_down", b"\x1bOB"),
        ("key_end", b"\x1bOF"),
        ("key_enter", b"\x1bOM"),
        ("key_f1", b"\x1bOP"),
        ("key_f2", b"\x1bOQ"),
        ("key_f3", b"\x1bOR"),
        ("key_f4", b"\x1bOS"),
        ("key_f5", b"\x1b[15~"),
        ("key_f6", b"\x1b[17~"),
        ("key_f7", b"\x1b[18~"),
        ("key_f8", b"\x1b[19~"),
        ("key_f9", b"\x1b[20~"),
        ("key_f10", b"\x1b[21~"),
        ("key_f11", b"\x1b[23~"),
        ("key_f12", b"\x1b[24~"),
        ("key_f13", b"\x1b[1;2P"),
        ("key_f14", b"\x1b[1;2Q"),
        ("key_f15", b"\x1b[1;2R"),
        ("key_f16", b"\x1b[1;2S"),
        ("key_f17", b"\x1b[15;2~"),
        ("key_f18", b"\x1b[17;2~"),
        ("key_f19", b"\x1b[18;2~"),
        ("key_f20", b"\x1b[19;2~"),
        ("key_home", b"\x1bOH"),
        ("key_ic", b"\x1b[2~"),
        ("key_left", b"\x1bOD"),
        ("key_npage", b"\x1b[6~"),
        ("key_ppage", b"\x1b[5~"),
        ("key_right", b"\x1bOC"),
        ("key_sdc", b"\x1b[3;2~"),
        ("key_send", b"\x1b[1;2F"),
        ("key_sf", b"\x1b[1;2B"),
        ("key_shome", b"\x1b[1;2H"),
        ("key_sic", b"\x1b[2;2~"),
        ("key_sleft", b"\x1b[1;2D"),
        ("key_snext", b"\x1b[6;2~"),
        ("key_sprevious", b"\x1b[5;2~"),
        ("key_sr", b"\x1b[1;2A"),
        ("key_sright", b"\x1b[1;2C"),
        ("key_up", b"\x1bOA"),
    ],
};

static LINUX: Family = Family {
    name: "linux",
    keys: &[
        ("key_backspace", b"\x7f"),
        ("key_btab", b"\x1b[Z"),
        ("key_dc", b"\x1b[3~"),
        ("key_down", b"\x1b[B"),
        ("key_end", b"\x1b[4~"),
        ("key_f1", b"\x1b[[A"),
        ("key_f2", b"\x1b[[B"),
        ("key_f3", b"\x1b[[C"),
        ("key_f4", b"\x1b[[D"),
        ("key_f5", b"\x1b[[E"),
        ("key_f6", b"\x1b[17~"),
        ("key_f7", b"\x1b[18~"),
        ("key_f8", b"\x1b[19~"),
        ("key_f9", b"\x1b[20~"),
        ("key_f10", b"\x1b[21~"),
        ("key_f11", b"\x1b[23~"),
        ("key_f12", b"\x1b[24~"),
        ("key_home", b"\x1b[1~"),
        ("key_ic", b"\x1b[2~"),
        ("key_left", b"\x1b[D"),
        ("key_npage", b"\x1b[6~"),
        ("key_ppage", b"\x1b[5~"),
        ("key_right", b"\x1b[C"),
        ("key_up", b"\x1b[A"),
    ],
};

static RXVT: Family = Family {
    name: "rxvt",
    keys: &[
        ("key_backspace", b"\x7f"),
        ("key_btab", b"\x1b[Z"),
        ("key_dc", b"\x1b[3~"),
        ("key_down", b"\x1b[B"),
        ("key_end", b"\x1b[8~"),
        ("key_f1", b"\x1b[11~"),
        ("key_f2", b"\x1b[12~"),
        ("key_f3", b"\x1b[13~"),
        ("key_f4", b"\x1b[14~"),
        ("key_f5", b"\x1b[15~"),
        ("key_f6", b"\x1b[17~"),
        ("key_f7", b"\x1b[18~"),
        ("key_f8", b"\x1b[19~"),
        ("key_f9", b"\x1b[20~"),
        ("key_f10", b"\x1b[21~"),
        ("key_f11", b"\x1b[23~"),
        ("key_f12", b"\x1b[24~"),
        ("key_home", b"\x1b[7~"),
        ("key_ic", b"\x1b[2~"),
        ("key_left", b"\x1b[D"),
        ("key_npage", b"\x1b[6~"),
        ("key_ppage", b"\x1b[5~"),
        ("key_right", b"\x1b[C"),
        ("key_sleft", b"\x1b[d"),
        ("key_sright", b"\x1b[c"),
        ("key_up", b"\x1b[A"),
    ],
};

static VT100: Family = Family {
    name: "vt100",
    keys: &[
        ("key_a1", b"\x1bOq"),
        ("key_a3", b"\x1bOs"),
        ("key_b2", b"\x1bOr"),
        ("key_backspace", b"\x08"),
        ("key_c1", b"\x1bOp"),
        ("key_c3", b"\x1bOn"),
        ("key_down", b"\x1bOB"),
        ("key_enter", b"\x1bOM"),
        ("key_f1", b"\x1bOP"),
        ("key_f2", b"\x1bOQ"),
        ("key_f3", b"\x1bOR"),
        ("key_f4", b"\x1bOS"),
        ("key_left", b"\x1bOD"),
        ("key_right", b"\x1bOC"),
        ("key_up", b"\x1bOA"),
    ],
};

static ANSI: Family = Family {
    name: "ansi",
    keys: &[
        ("key_backspace", b"\x08"),
        ("key_btab", b"\x1b[Z"),
        ("key_down", b"\x1b[B"),
        ("key_home", b"\x1b[H"),
        ("key_ic", b"\x1b[L"),
        ("key_left", b"\x1b[D"),
        ("key_right", b"\x1b[C"),
        ("key_up", b"\x1b[A"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_selection() {
        assert_eq!(family_for("xterm").map(|f| f.name), Some("xterm"));
        assert_eq!(family_for("xterm-256color").map(|f| f.name), Some("xterm"));
        assert_eq!(family_for("screen.xterm").map(|f| f.name), Some("xterm"));
        assert_eq!(family_for("tmux-256color").map(|f| f.name), Some("xterm"));
        assert_eq!(family_for("linux").map(|f| f.name), Some("linux"));
        assert_eq!(
            family_for("rxvt-unicode-256color").map(|f| f.name),
            Some("rxvt")
        );
        assert_eq!(family_for("vt100").map(|f| f.name), Some("vt100"));
        assert_eq!(family_for("ansi").map(|f| f.name), Some("ansi"));
        assert!(family_for("dumb").is_none());
    }

    #[test]
    fn test_all_table_names_are_known() {
        for family in [&XTERM, &LINUX, &RXVT, &VT100, &ANSI] {
            for (name, _) in family.keys {
                assert!(
                    crate::KEY_NAMES.contains(name),
                    "{} lists unknown capability {name}",
                    family.name
                );
            }
        }
    }
}
