//! Role holders for the deployment
//!
//! Admin, relayer, governor and emergency actor addresses, plus the mapping
//! from account addresses to the key names the signing service knows them
//! by. Loaded once as part of [`crate::Config`]; the defaults are the mainnet
//! deployment.

use crate::constants::{RELAYER, SUPER_ADMIN};
use crate::types::ContractAddr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Access-control roles of the deployed contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Relayer,
    Governor,
    EmergencyActor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub super_admin: ContractAddr,
    pub relayer: ContractAddr,
    pub emergency_actors: Vec<ContractAddr>,
    pub governors: Vec<ContractAddr>,
    /// Account key name by address
    pub account_names: BTreeMap<ContractAddr, String>,
}

impl Default for RoleConfig {
    fn default() -> Self {
        let mut account_names = BTreeMap::new();
        account_names.insert(SUPER_ADMIN, "strkfarmadmin2".to_string());
        account_names.insert(RELAYER, "risk-manager".to_string());

        Self {
            super_admin: SUPER_ADMIN,
            relayer: RELAYER,
            emergency_actors: vec![RELAYER],
            // Hot wallet for now, to be replaced by a multisig
            governors: vec![SUPER_ADMIN],
            account_names,
        }
    }
}

impl RoleConfig {
    /// Address registered under an account key name
    pub fn address_of(&self, account_name: &str) -> Option<ContractAddr> {
        self.account_names
            .iter()
            .find(|(_, name)| name.as_str() == account_name)
            .map(|(addr, _)| *addr)
    }

    /// Account key name for an address
    pub fn account_name(&self, address: &ContractAddr) -> Option<&str> {
        self.account_names.get(address).map(|s| s.as_str())
    }

    pub fn has_role(&self, address: &ContractAddr, role: Role) -> bool {
        match role {
            Role::SuperAdmin => &self.super_admin == address,
            Role::Relayer => &self.relayer == address,
            Role::Governor => self.governors.contains(address),
            Role::EmergencyActor => self.emergency_actors.contains(address),
        }
    }

    /// All roles held by an address
    pub fn roles_of(&self, address: &ContractAddr) -> Vec<Role> {
        [
            Role::SuperAdmin,
            Role::Relayer,
            Role::Governor,
            Role::EmergencyActor,
        ]
        .into_iter()
        .filter(|role| self.has_role(address, *role))
        .collect()
    }
}
