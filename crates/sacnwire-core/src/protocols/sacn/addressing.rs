use std::net::{Ipv4Addr, SocketAddrV4};

use super::layout;

/// IPv4 multicast group a universe is sent to: `239.255.<hi>.<lo>`.
///
/// # Examples
/// ```
/// use std::net::Ipv4Addr;
/// use sacnwire_core::protocols::sacn::addressing::multicast_addr;
///
/// assert_eq!(multicast_addr(1), Ipv4Addr::new(239, 255, 0, 1));
/// assert_eq!(multicast_addr(0x0102), Ipv4Addr::new(239, 255, 1, 2));
/// ```
pub fn multicast_addr(universe: u16) -> Ipv4Addr {
    let [hi, lo] = universe.to_be_bytes();
    Ipv4Addr::new(239, 255, hi, lo)
}

pub fn multicast_socket_addr(universe: u16) -> SocketAddrV4 {
    SocketAddrV4::new(multicast_addr(universe), layout::SACN_PORT)
}

pub fn is_valid_universe(universe: u16) -> bool {
    (layout::MIN_UNIVERSE..=layout::MAX_UNIVERSE).contains(&universe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_uses_sacn_port() {
        let addr = multicast_socket_addr(63999);
        assert_eq!(*addr.ip(), Ipv4Addr::new(239, 255, 249, 255));
        assert_eq!(addr.port(), 5568);
    }

    #[test]
    fn universe_bounds() {
        assert!(!is_valid_universe(0));
        assert!(is_valid_universe(1));
        assert!(is_valid_universe(63999));
        assert!(!is_valid_universe(64000));
    }
}
