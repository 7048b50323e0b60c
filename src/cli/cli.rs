use clap::ArgMatches;
use log::debug;

use crate::{
    cli::filesystem::FileSystem,
    config::ParserConfig,
    json::parser::JsonParser,
};

pub const SAMPLE_DOCUMENT: &str = r#"{
    "firstName": "John",
    "lastName": "Smith",
    "age": 25,
    "address": {
        "streetAddress": "21 2nd Street",
        "city": "New York",
        "state": "NY",
        "postalCode": 10021
    },
    "phoneNumbers": [
        {
            "type": "home",
            "number": "212 555-1234"
        },
        {
            "type": "fax",
            "number": "646 555-4567"
        }
    ]
}"#;

pub struct Cli {
    pub filesystem: FileSystem,
    parser: JsonParser,
}

impl Cli {
    pub fn new(filesystem: FileSystem, config: ParserConfig) -> Result<Self, String> {
        let parser = JsonParser::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self { filesystem, parser })
    }

    /// Builds a `Cli` honouring the global `--config` option.
    pub fn from_matches(filesystem: FileSystem, matches: &ArgMatches) -> Result<Self, String> {
        let config = match matches.get_one::<String>("config") {
            Some(path) => ParserConfig::from_toml(&filesystem.read_file(path)?)?,
            None => ParserConfig::default(),
        };
        Self::new(filesystem, config)
    }

    pub fn run(&self, matches: &ArgMatches) -> Result<String, String> {
        match matches.subcommand() {
            Some(("decode", sub_matches)) => self.decode(sub_matches),
            Some(("tree", sub_matches)) => self.tree(sub_matches),
            Some(("tokens", sub_matches)) => self.tokens(sub_matches),
            Some(("sample", sub_matches)) => self.sample(sub_matches),
            _ => Err("No subcommand was provided".to_string()),
        }
    }

    pub fn decode(&self, sub_matches: &ArgMatches) -> Result<String, String> {
        let input = self.read_input(sub_matches)?;
        self.decode_str(&input, sub_matches.get_flag("pretty"))
    }

    pub fn tree(&self, sub_matches: &ArgMatches) -> Result<String, String> {
        let input = self.read_input(sub_matches)?;
        let tree = self.parser.parse_tree(&input).map_err(|e| e.to_string())?;
        debug!("Parse tree has depth {}", tree.get_depth());
        Ok(tree.to_string())
    }

    pub fn tokens(&self, sub_matches: &ArgMatches) -> Result<String, String> {
        let input = self.read_input(sub_matches)?;
        let tokens = self
            .parser
            .tokens(&input)
            .map(|token| token.map(|t| t.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        Ok(tokens.join("\n"))
    }

    pub fn sample(&self, sub_matches: &ArgMatches) -> Result<String, String> {
        self.decode_str(SAMPLE_DOCUMENT, sub_matches.get_flag("pretty"))
    }

    fn decode_str(&self, input: &str, pretty: bool) -> Result<String, String> {
        let value = self.parser.parse(input).map_err(|e| e.to_string())?;
        value.to_json_string(pretty)
    }

    fn read_input(&self, sub_matches: &ArgMatches) -> Result<String, String> {
        match sub_matches.get_one::<String>("input") {
            Some(path) => self.filesystem.read_file(path),
            None => Err("No input was provided".to_string()),
        }
    }
}
