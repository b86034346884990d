//! # fserve Interface Enumeration (`common::network::interfaces`)
//!
//! File: cli/src/common/network/interfaces.rs
//!
//! ## Overview
//!
//! Lists every network interface on the host and the addresses bound to it,
//! in the order the platform reports them. No sorting is applied, so the
//! order can differ between hosts and between runs.
//!
//! Enumeration and rendering are separate steps:
//! - `collect_interfaces` reads the platform's interface address table
//!   (`getifaddrs(3)` through `nix`) and groups it by interface name. Link
//!   layer entries (`AF_PACKET`, `AF_LINK`) register an interface even when
//!   no IP address is bound to it.
//! - `render_interfaces` writes the human-readable listing to any writer.
//!
//! ## Output Format
//!
//! ```text
//!
//! lo
//!   127.0.0.1/8
//!   ::1/128
//!
//! eth0
//!   192.168.1.20/24
//!
//! ifb0
//! ```
//!
//! An address the table reports without a usable netmask cannot be shown in
//! CIDR form; it is listed as an `Error: <message>` line under its interface,
//! after the interface's valid addresses, and the listing goes on.
//!
use crate::core::error::Result;
use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// # Interface Report (`InterfaceReport`)
///
/// One interface with its addresses in CIDR notation and any per-address
/// failures. Both lists may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceReport {
    pub name: String,
    pub addresses: Vec<String>,
    pub errors: Vec<String>,
}

/// One row of the platform table: the interface it belongs to and, for IP
/// families, the address or the reason it cannot be expressed.
type TableEntry<'a> = (&'a str, Option<std::result::Result<String, String>>);

/// # Collect Interfaces (`collect_interfaces`)
///
/// Reads the interface address table and groups it into one report per
/// interface, keeping first-seen order for interfaces and addresses.
///
/// ## Returns
///
/// * `Result<Vec<InterfaceReport>>`: Every interface the platform knows about,
///   including ones with no IP address bound.
///
/// ## Errors
///
/// Returns `FserveError::InterfaceEnumeration` when the table itself cannot
/// be read (or, off Unix, is not available at all). Problems with a single
/// address are not errors here; they are carried in that interface's
/// `InterfaceReport::errors`.
#[cfg(unix)]
pub fn collect_interfaces() -> Result<Vec<InterfaceReport>> {
    use crate::core::error::FserveError;
    use tracing::debug;

    let table: Vec<_> = nix::ifaddrs::getifaddrs()
        .map_err(|errno| FserveError::InterfaceEnumeration(errno.into()))?
        .collect();
    debug!("Platform reported {} interface table entries", table.len());

    Ok(group_by_interface(table.iter().map(|entry| {
        (entry.interface_name.as_str(), table_address(entry))
    })))
}

#[cfg(not(unix))]
pub fn collect_interfaces() -> Result<Vec<InterfaceReport>> {
    use crate::core::error::FserveError;

    Err(FserveError::InterfaceEnumeration(io::Error::new(
        io::ErrorKind::Unsupported,
        "interface enumeration is not supported on this platform",
    ))
    .into())
}

/// # Render Interfaces (`render_interfaces`)
///
/// Writes the listing: a blank line and the name for each interface, each
/// address indented by two spaces, then one `Error:` line per failure.
pub fn render_interfaces<W: Write>(out: &mut W, reports: &[InterfaceReport]) -> io::Result<()> {
    for report in reports {
        write!(out, "\n{}\n", report.name)?;
        for addr in &report.addresses {
            writeln!(out, "  {}", addr)?;
        }
        for e in &report.errors {
            writeln!(out, "Error: {}", e)?;
        }
    }
    out.flush()
}

/// Folds table rows into one report per interface. Rows without an address
/// only make sure the interface is listed.
fn group_by_interface<'a, I>(entries: I) -> Vec<InterfaceReport>
where
    I: IntoIterator<Item = TableEntry<'a>>,
{
    let mut reports: Vec<InterfaceReport> = Vec::new();

    for (name, addr) in entries {
        let idx = match reports.iter().position(|r| r.name == name) {
            Some(idx) => idx,
            None => {
                reports.push(InterfaceReport {
                    name: name.to_string(),
                    ..InterfaceReport::default()
                });
                reports.len() - 1
            }
        };

        match addr {
            Some(Ok(addr)) => reports[idx].addresses.push(addr),
            Some(Err(e)) => reports[idx].errors.push(e),
            None => {}
        }
    }

    reports
}

/// The IP address of a table row in CIDR form, `None` for non-IP families.
#[cfg(unix)]
fn table_address(
    entry: &nix::ifaddrs::InterfaceAddress,
) -> Option<std::result::Result<String, String>> {
    use std::net::{SocketAddrV4, SocketAddrV6};

    let address = entry.address.as_ref()?;
    let netmask = entry.netmask.as_ref();

    if let Some(sin) = address.as_sockaddr_in() {
        let ip = *SocketAddrV4::from(*sin).ip();
        let mask = netmask
            .and_then(|m| m.as_sockaddr_in())
            .map(|m| *SocketAddrV4::from(*m).ip());
        return Some(match mask {
            Some(mask) => v4_prefix_len(mask).map(|len| format_cidr(ip.into(), len)),
            None => Err(format!("no netmask reported for {}", ip)),
        });
    }

    if let Some(sin6) = address.as_sockaddr_in6() {
        let ip = *SocketAddrV6::from(*sin6).ip();
        let mask = netmask
            .and_then(|m| m.as_sockaddr_in6())
            .map(|m| *SocketAddrV6::from(*m).ip());
        return Some(match mask {
            Some(mask) => v6_prefix_len(mask).map(|len| format_cidr(ip.into(), len)),
            None => Err(format!("no netmask reported for {}", ip)),
        });
    }

    None
}

fn format_cidr(ip: IpAddr, prefix_len: u32) -> String {
    format!("{}/{}", ip, prefix_len)
}

fn v4_prefix_len(mask: Ipv4Addr) -> std::result::Result<u32, String> {
    let bits = u32::from(mask);
    let len = bits.leading_ones();
    if bits.count_ones() == len {
        Ok(len)
    } else {
        Err(format!("non-contiguous netmask {}", mask))
    }
}

fn v6_prefix_len(mask: Ipv6Addr) -> std::result::Result<u32, String> {
    let bits = u128::from(mask);
    let len = bits.leading_ones();
    if bits.count_ones() == len {
        Ok(len)
    } else {
        Err(format!("non-contiguous netmask {}", mask))
    }
}

// --- Unit Tests ---
