//! Start-up banner.

use std::io::{self, Write};

const BANNER: &str = r#"
__  __           ______      __
\ \/ /___  __  _/_  __/_  __/ /_  ___
 \  / __ \/ / / // / / / / / __ \/ _ \
 / / /_/ / /_/ // / / /_/ / /_/ /  __/
/_/\____/\__,_//_/  \__,_/_.___/\___/
    ____                      __                __
   / __ \____ _      ______  / /___  ____ _____/ /__  _____
  / / / / __ \ | /| / / __ \/ / __ \/ __ `/ __  / _ \/ ___/
 / /_/ / /_/ / |/ |/ / / / / / /_/ / /_/ / /_/ /  __/ /
/_____/\____/|__/|__/_/ /_/_/\____/\__,_/\__,_/\___/_/
"#;

pub fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", BANNER)
}
