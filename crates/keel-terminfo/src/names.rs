//! The master list of key capability names.

/// All key capability names the registry knows about, in registry order.
///
/// Function keys stop at `key_f20`; keyboards with more exist mostly in
/// listings, not on desks.
pub const KEY_NAMES: &[&str] = &[
    "key_a1",
    "key_a3",
    "key_b2",
    "key_backspace",
    "key_beg",
    "key_btab",
    "key_c1",
    "key_c3",
    "key_cancel",
    "key_catab",
    "key_clear",
    "key_close",
    "key_command",
    "key_copy",
    "key_create",
    "key_ctab",
    "key_dc",
    "key_dl",
    "key_down",
    "key_eic",
    "key_end",
    "key_enter",
    "key_eol",
    "key_eos",
    "key_exit",
    "key_f0",
    "key_f1",
    "key_f2",
    "key_f3",
    "key_f4",
    "key_f5",
    "key_f6",
    "key_f7",
    "key_f8",
    "key_f9",
    "key_f10",
    "key_f11",
    "key_f12",
    "key_f13",
    "key_f14",
    "key_f15",
    "key_f16",
    "key_f17",
    "key_f18",
    "key_f19",
    "key_f20",
    "key_find",
    "key_help",
    "key_home",
    "key_ic",
    "key_il",
    "key_left",
    "key_ll",
    "key_mark",
    "key_message",
    "key_move",
    "key_next",
    "key_npage",
    "key_open",
    "key_options",
    "key_ppage",
    "key_previous",
    "key_print",
    "key_redo",
    "key_reference",
    "key_refresh",
    "key_replace",
    "key_restart",
    "key_resume",
    "key_right",
    "key_save",
    "key_sbeg",
    "key_scancel",
    "key_scommand",
    "key_scopy",
    "key_screate",
    "key_sdc",
    "key_sdl",
    "key_select",
    "key_send",
    "key_seol",
    "key_sexit",
    "key_sf",
    "key_sfind",
    "key_shelp",
    "key_shome",
    "key_sic",
    "key_sleft",
    "key_smessage",
    "key_smove",
    "key_snext",
    "key_soptions",
    "key_sprevious",
    "key_sprint",
    "key_sr",
    "key_sredo",
    "key_sreplace",
    "key_sright",
    "key_srsume",
    "key_ssave",
    "key_ssuspend",
    "key_stab",
    "key_sundo",
    "key_suspend",
    "key_undo",
    "key_up",
];
