pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
