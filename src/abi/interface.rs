use alloy_json_abi::{Function, JsonAbi};
use std::fmt;
use std::path::Path;

use crate::errors::{Result, SummonError};

/// A parsed contract interface description (JSON ABI).
#[derive(Debug, Clone)]
pub struct ContractInterface {
    name: String,
    abi: JsonAbi,
}

impl ContractInterface {
    /// Parse a JSON ABI document.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let name = name.into();
        let abi: JsonAbi = serde_json::from_str(json)
            .map_err(|e| SummonError::Interface { name: name.clone(), reason: e.to_string() })?;
        Ok(Self { name, abi })
    }

    /// Interface name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the interface declares a function with this name.
    pub fn has_function(&self, function: &str) -> bool {
        self.abi.function(function).is_some_and(|overloads| !overloads.is_empty())
    }

    /// Look up a function by name.
    ///
    /// For overloaded names the overload taking `arity` inputs wins; otherwise
    /// the first declaration is returned and arity is checked by the encoder.
    pub fn function(&self, function: &str, arity: usize) -> Result<&Function> {
        let overloads = self.abi.function(function).ok_or_else(|| SummonError::FunctionNotFound {
            interface: self.name.clone(),
            function: function.to_owned(),
        })?;
        overloads
            .iter()
            .find(|f| f.inputs.len() == arity)
            .or_else(|| overloads.first())
            .ok_or_else(|| SummonError::FunctionNotFound {
                interface: self.name.clone(),
                function: function.to_owned(),
            })
    }
}

/// The contract kinds the summon pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// HOS summoner: DAO-proxy factory, shaman summoner and summon entry point
    HosSummoner,
    /// Safe proxy factory
    SafeProxyFactory,
    /// Baal DAO contract
    Baal,
    /// Poster contract
    Poster,
    /// Safe L2 singleton (module management)
    SafeL2,
}

impl InterfaceKind {
    /// All kinds, in load order.
    pub const ALL: [InterfaceKind; 5] = [
        InterfaceKind::HosSummoner,
        InterfaceKind::SafeProxyFactory,
        InterfaceKind::Baal,
        InterfaceKind::Poster,
        InterfaceKind::SafeL2,
    ];

    /// File name of the JSON description inside an ABI directory.
    pub fn file_name(self) -> &'static str {
        match self {
            InterfaceKind::HosSummoner => "hos_summoner.json",
            InterfaceKind::SafeProxyFactory => "safe_proxy_factory.json",
            InterfaceKind::Baal => "baal.json",
            InterfaceKind::Poster => "poster.json",
            InterfaceKind::SafeL2 => "safe_l2.json",
        }
    }

    fn bundled_json(self) -> &'static str {
        match self {
            InterfaceKind::HosSummoner => include_str!("../abis/hos_summoner.json"),
            InterfaceKind::SafeProxyFactory => include_str!("../abis/safe_proxy_factory.json"),
            InterfaceKind::Baal => include_str!("../abis/baal.json"),
            InterfaceKind::Poster => include_str!("../abis/poster.json"),
            InterfaceKind::SafeL2 => include_str!("../abis/safe_l2.json"),
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceKind::HosSummoner => "HOS summoner",
            InterfaceKind::SafeProxyFactory => "Safe proxy factory",
            InterfaceKind::Baal => "Baal",
            InterfaceKind::Poster => "Poster",
            InterfaceKind::SafeL2 => "Safe L2",
        };
        f.write_str(name)
    }
}

/// Every contract interface the pipeline needs, loaded once at start and
/// passed by reference.
#[derive(Debug, Clone)]
pub struct ContractInterfaceRegistry {
    summoner: ContractInterface,
    proxy_factory: ContractInterface,
    baal: ContractInterface,
    poster: ContractInterface,
    safe: ContractInterface,
}

impl ContractInterfaceRegistry {
    /// Interfaces compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::load_with(|kind| Ok(kind.bundled_json().to_owned()))
    }

    /// Load every interface from `<dir>/<kind file name>`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::load_with(|kind| {
            let path = dir.join(kind.file_name());
            std::fs::read_to_string(&path).map_err(|e| SummonError::Interface {
                name: kind.to_string(),
                reason: format!("{}: {e}", path.display()),
            })
        })
    }

    fn load_with(mut read: impl FnMut(InterfaceKind) -> Result<String>) -> Result<Self> {
        let mut load = |kind: InterfaceKind| -> Result<ContractInterface> {
            ContractInterface::from_json(kind.to_string(), &read(kind)?)
        };
        Ok(Self {
            summoner: load(InterfaceKind::HosSummoner)?,
            proxy_factory: load(InterfaceKind::SafeProxyFactory)?,
            baal: load(InterfaceKind::Baal)?,
            poster: load(InterfaceKind::Poster)?,
            safe: load(InterfaceKind::SafeL2)?,
        })
    }

    /// Interface for the given contract kind.
    pub fn get(&self, kind: InterfaceKind) -> &ContractInterface {
        match kind {
            InterfaceKind::HosSummoner => &self.summoner,
            InterfaceKind::SafeProxyFactory => &self.proxy_factory,
            InterfaceKind::Baal => &self.baal,
            InterfaceKind::Poster => &self.poster,
            InterfaceKind::SafeL2 => &self.safe,
        }
    }
}
