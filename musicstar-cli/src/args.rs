use std::path::PathBuf;

pub const USAGE: &str = "\
usage: musicstar [options]

  --seconds N      length of the run in seconds (default 8)
  --fps N          frames per second (default from config)
  --script PATH    JSON list of timed actions to apply
  --config PATH    config file to use instead of ~/.config/musicstar/config.toml
  --json           print fired notes as JSON lines
  --dump-state     print the final sequencer state as JSON
  --realtime       pace frames against the wall clock
  -v, --verbose    debug logging
  -h, --help       show this help";

const DEFAULT_SECONDS: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub seconds: f64,
    pub fps: Option<u32>,
    pub script: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub dump_state: bool,
    pub realtime: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_SECONDS,
            fps: None,
            script: None,
            config: None,
            json: false,
            dump_state: false,
            realtime: false,
            verbose: false,
            help: false,
        }
    }
}

impl Options {
    /// Parse command-line arguments (without the program name).
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seconds" => {
                    let value = next_value(&mut iter, arg)?;
                    let seconds: f64 = value
                        .parse()
                        .map_err(|_| format!("invalid --seconds value '{}'", value))?;
                    if !seconds.is_finite() || seconds < 0.0 {
                        return Err(format!("--seconds must be a non-negative number, got {}", value));
                    }
                    opts.seconds = seconds;
                }
                "--fps" => {
                    let value = next_value(&mut iter, arg)?;
                    let fps: u32 = value
                        .parse()
                        .map_err(|_| format!("invalid --fps value '{}'", value))?;
                    if !(1..=1000).contains(&fps) {
                        return Err(format!("--fps must be between 1 and 1000, got {}", fps));
                    }
                    opts.fps = Some(fps);
                }
                "--script" => opts.script = Some(PathBuf::from(next_value(&mut iter, arg)?)),
                "--config" => opts.config = Some(PathBuf::from(next_value(&mut iter, arg)?)),
                "--json" => opts.json = true,
                "--dump-state" => opts.dump_state = true,
                "--realtime" => opts.realtime = true,
                "--verbose" | "-v" => opts.verbose = true,
                "--help" | "-h" => opts.help = true,
                other => return Err(format!("unknown argument '{}'", other)),
            }
        }
        Ok(opts)
    }
}

fn next_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str, String> {
    iter.next()
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} needs a value", flag))
}
