use {
    alloy::primitives::{Address, B256, U256},
    order_validation::{Addresses, Config},
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(clap::Parser)]
#[clap(version, about = "Read-only linter for exchange orders")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// Report issues by name (`Time.Expired`) instead of numeric code.
    #[clap(long, env, global = true)]
    pub names: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, global = true, default_value = "warn,linter=info,order_validation=info")]
    pub log_filter: String,

    /// Events at least this severe are logged to stderr, everything else to
    /// stdout next to the report.
    #[clap(long, env, global = true, default_value = "trace")]
    pub log_stderr_threshold: LevelFilter,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, global = true, default_value = "false")]
    pub use_json_logs: bool,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Runs the full validation pipeline against a JSON order.
    Validate(ValidateArguments),
    /// Computes the Merkle root committing to a set of identifiers.
    MerkleRoot {
        /// Comma separated token identifiers.
        #[clap(long, use_value_delimiter = true)]
        identifiers: Vec<U256>,
    },
    /// Computes the inclusion proof of one identifier of a set.
    MerkleProof {
        /// Comma separated token identifiers.
        #[clap(long, use_value_delimiter = true)]
        identifiers: Vec<U256>,

        /// Index into the set sorted by leaf hash.
        #[clap(long)]
        index: usize,
    },
    /// Checks an inclusion proof against a Merkle root.
    MerkleVerify {
        #[clap(long)]
        root: B256,

        /// Comma separated sibling hashes.
        #[clap(long, use_value_delimiter = true)]
        proof: Vec<B256>,

        #[clap(long)]
        identifier: U256,
    },
}

#[derive(clap::Parser)]
pub struct ValidateArguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Path to the JSON order. `-` reads the order from stdin.
    #[clap(long, default_value = "-")]
    pub order: PathBuf,

    #[clap(flatten)]
    pub contracts: ContractArguments,

    #[clap(flatten)]
    pub validation: ValidationArguments,
}

/// Overrides of the canonical contract deployments of the connected chain.
#[derive(clap::Parser)]
pub struct ContractArguments {
    /// Exchange providing counters, order status and the domain separator.
    #[clap(long, env)]
    pub exchange: Option<Address>,

    #[clap(long, env)]
    pub conduit_controller: Option<Address>,

    #[clap(long, env)]
    pub royalty_engine: Option<Address>,
}

impl ContractArguments {
    /// Applies the overrides on top of `defaults`. `None` if the exchange or
    /// the conduit controller is neither given nor known.
    pub fn resolve(&self, defaults: Option<Addresses>) -> Option<Addresses> {
        Some(Addresses {
            exchange: self
                .exchange
                .or(defaults.map(|defaults| defaults.exchange))?,
            conduit_controller: self
                .conduit_controller
                .or(defaults.map(|defaults| defaults.conduit_controller))?,
            royalty_engine: self
                .royalty_engine
                .or(defaults.and_then(|defaults| defaults.royalty_engine)),
        })
    }
}

#[derive(clap::Parser)]
pub struct ValidationArguments {
    /// Recipient of the protocol fee checked in strict mode. The zero
    /// address disables the protocol fee check.
    #[clap(long, env, default_value_t = Address::ZERO)]
    pub protocol_fee_recipient: Address,

    #[clap(long, env, default_value = "0")]
    pub protocol_fee_bips: u64,

    /// Requires royalties reported by the royalty engine to be paid.
    #[clap(long, env)]
    pub check_royalty_fee: bool,

    /// Enables the strict fee and private sale checks.
    #[clap(long, env)]
    pub strict: bool,

    /// Orders active for less than this get a warning.
    #[clap(
        long,
        env,
        default_value = "30m",
        value_parser = humantime::parse_duration,
    )]
    pub short_order_duration: Duration,

    /// Orders expiring later than this from now get a warning.
    #[clap(
        long,
        env,
        default_value = "30weeks",
        value_parser = humantime::parse_duration,
    )]
    pub distant_order_expiration: Duration,

    /// Caller identity passed to zone callbacks.
    #[clap(long, env, default_value_t = Address::ZERO)]
    pub caller: Address,
}

impl ValidationArguments {
    pub fn config(&self) -> Config {
        Config {
            protocol_fee_recipient: self.protocol_fee_recipient,
            protocol_fee_bips: self.protocol_fee_bips,
            check_royalty_fee: self.check_royalty_fee,
            skip_strict_validation: !self.strict,
            short_order_duration: self.short_order_duration,
            distant_order_expiration: self.distant_order_expiration,
            caller: self.caller,
        }
    }
}

fn display_option(f: &mut Formatter<'_>, name: &str, option: &Option<impl Display>) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            names,
            command,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "names: {names}")?;
        write!(f, "{command}")?;
        Ok(())
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validate(arguments) => {
                writeln!(f, "command: validate")?;
                write!(f, "{arguments}")
            }
            Self::MerkleRoot { identifiers } => {
                writeln!(f, "command: merkle-root")?;
                writeln!(f, "identifiers: {}", identifiers.len())
            }
            Self::MerkleProof { identifiers, index } => {
                writeln!(f, "command: merkle-proof")?;
                writeln!(f, "identifiers: {}", identifiers.len())?;
                writeln!(f, "index: {index}")
            }
            Self::MerkleVerify {
                root,
                proof,
                identifier,
            } => {
                writeln!(f, "command: merkle-verify")?;
                writeln!(f, "root: {root}")?;
                writeln!(f, "proof: {}", proof.len())?;
                writeln!(f, "identifier: {identifier}")
            }
        }
    }
}

impl Display for ValidateArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            node_url,
            order,
            contracts,
            validation,
        } = self;

        // Node urls regularly contain api keys.
        writeln!(f, "node_url: {}", node_url.host_str().unwrap_or("SECRET"))?;
        writeln!(f, "order: {}", order.display())?;
        display_option(f, "exchange", &contracts.exchange)?;
        display_option(f, "conduit_controller", &contracts.conduit_controller)?;
        display_option(f, "royalty_engine", &contracts.royalty_engine)?;
        writeln!(
            f,
            "protocol_fee_recipient: {}",
            validation.protocol_fee_recipient
        )?;
        writeln!(f, "protocol_fee_bips: {}", validation.protocol_fee_bips)?;
        writeln!(f, "check_royalty_fee: {}", validation.check_royalty_fee)?;
        writeln!(f, "strict: {}", validation.strict)?;
        writeln!(
            f,
            "short_order_duration: {:?}",
            validation.short_order_duration
        )?;
        writeln!(
            f,
            "distant_order_expiration: {:?}",
            validation.distant_order_expiration
        )?;
        writeln!(f, "caller: {}", validation.caller)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::address,
        clap::{CommandFactory, Parser},
    };

    #[test]
    fn command_is_well_formed() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn validate_defaults() {
        let args = Arguments::try_parse_from(["linter", "validate"]).unwrap();
        let Command::Validate(validate) = &args.command else {
            panic!("expected validate command");
        };
        assert_eq!(validate.order, PathBuf::from("-"));
        assert_eq!(validate.validation.config(), Config::default());
        assert!(!args.names);
    }

    #[test]
    fn validation_config() {
        let args = Arguments::try_parse_from([
            "linter",
            "validate",
            "--strict",
            "--check-royalty-fee",
            "--protocol-fee-recipient",
            "0x0000a26b00c1F0DF003000390027140000fAa719",
            "--protocol-fee-bips",
            "250",
            "--short-order-duration",
            "1h",
            "--names",
        ])
        .unwrap();
        let Command::Validate(validate) = &args.command else {
            panic!("expected validate command");
        };
        let config = validate.validation.config();
        assert!(!config.skip_strict_validation);
        assert!(config.check_royalty_fee);
        assert_eq!(config.protocol_fee_bips, 250);
        assert_eq!(
            config.protocol_fee_recipient,
            address!("0x0000a26b00c1F0DF003000390027140000fAa719")
        );
        assert_eq!(config.short_order_duration, Duration::from_secs(3_600));
        assert!(args.names);
    }

    #[test]
    fn merkle_identifiers_are_comma_separated() {
        let args = Arguments::try_parse_from([
            "linter",
            "merkle-proof",
            "--identifiers",
            "1,2,0x10",
            "--index",
            "2",
        ])
        .unwrap();
        let Command::MerkleProof { identifiers, index } = args.command else {
            panic!("expected merkle-proof command");
        };
        assert_eq!(identifiers, [U256::from(1), U256::from(2), U256::from(16)]);
        assert_eq!(index, 2);
    }

    #[test]
    fn contract_overrides() {
        let defaults = Addresses {
            exchange: Address::repeat_byte(1),
            conduit_controller: Address::repeat_byte(2),
            royalty_engine: None,
        };
        let overrides = ContractArguments {
            exchange: Some(Address::repeat_byte(3)),
            conduit_controller: None,
            royalty_engine: Some(Address::repeat_byte(4)),
        };
        assert_eq!(
            overrides.resolve(Some(defaults)),
            Some(Addresses {
                exchange: Address::repeat_byte(3),
                conduit_controller: Address::repeat_byte(2),
                royalty_engine: Some(Address::repeat_byte(4)),
            })
        );
        assert_eq!(overrides.resolve(None), None);
    }
}
