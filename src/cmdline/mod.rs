/// Options accepted by the command line entrypoint. Anything which is not a
/// recognized flag is treated as the script path; a second path lands in
/// `extra` and triggers a usage error in the driver.
#[derive(Debug, Default)]
pub struct CommandLineOptions {
    pub file: Option<String>,
    pub debug: bool,
    pub strict_concat: bool,
    pub extra: Vec<String>,
}

impl CommandLineOptions {
    pub fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    pub fn parse_from<T: IntoIterator<Item = String>>(args: T) -> Self {
        let mut options = Self::default();

        for arg in args {
            match arg.as_str() {
                "-d" | "--debug" => options.debug = true,
                "--strict-concat" => options.strict_concat = true,
                _ if options.file.is_none() => options.file = Some(arg),
                _ => options.extra.push(arg),
            }
        }

        options
    }
}
