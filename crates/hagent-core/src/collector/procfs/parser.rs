//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of various `/proc` files
//! into structured data. They are designed to be easily testable with string inputs.

use std::net::Ipv4Addr;

/// Number of counter columns in a `/proc/net/dev` row.
pub const NET_DEV_COLUMNS: usize = 16;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Content does not have the expected shape.
    Malformed(String),
    /// A `/proc/net/dev` data row with fewer counters than required.
    ShortRecord { line: String, parsed: usize },
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        ParseError::Malformed(msg.into())
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Malformed(msg) => write!(f, "Parse error: {}", msg),
            ParseError::ShortRecord { line, parsed } => write!(
                f,
                "Parse error: only read {} of {} values from {:?}",
                parsed, NET_DEV_COLUMNS, line
            ),
        }
    }
}

impl std::error::Error for ParseError {}

// ============ Network Device Stats Parser ============

/// One data row of `/proc/net/dev`.
#[derive(Debug, Clone, PartialEq)]
pub struct NetDevRecord {
    /// Interface name (eth0, lo, etc.)
    pub interface: String,
    /// Counters in column order: 8 receive columns then 8 transmit columns.
    pub counters: [u64; NET_DEV_COLUMNS],
}

/// Parses a single line of `/proc/net/dev`.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
///
/// Returns `Ok(None)` for lines without a colon (headers, blank lines).
/// Values are consumed left to right until one fails to parse; a data row
/// yielding fewer than 16 values is an error. Extra columns are ignored.
pub fn parse_net_dev_line(line: &str) -> Result<Option<NetDevRecord>, ParseError> {
    let Some((name, data)) = line.split_once(':') else {
        return Ok(None);
    };

    let mut counters = [0u64; NET_DEV_COLUMNS];
    let mut parsed = 0;
    for token in data.split_whitespace().take(NET_DEV_COLUMNS) {
        match token.parse::<u64>() {
            Ok(value) => {
                counters[parsed] = value;
                parsed += 1;
            }
            Err(_) => break,
        }
    }

    if parsed < NET_DEV_COLUMNS {
        return Err(ParseError::ShortRecord {
            line: line.to_string(),
            parsed,
        });
    }

    Ok(Some(NetDevRecord {
        interface: name.trim().to_string(),
        counters,
    }))
}

// ============ Memory Info Parser ============

/// Parsed data from `/proc/meminfo`, in kB as the kernel reports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
}

/// Parses `/proc/meminfo` content.
///
/// `MemTotal` and `MemFree` are required. `MemAvailable` is missing on
/// kernels older than 3.14 and defaults to `MemFree` there.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let parse_kb = |line: &str| -> Result<u64, ParseError> {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ParseError::new(format!("bad meminfo line: {:?}", line)))
    };

    let mut total = None;
    let mut free = None;
    let mut available = None;

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            total = Some(parse_kb(line)?);
        } else if line.starts_with("MemFree:") {
            free = Some(parse_kb(line)?);
        } else if line.starts_with("MemAvailable:") {
            available = Some(parse_kb(line)?);
        }
    }

    let mem_total = total.ok_or_else(|| ParseError::new("MemTotal missing from meminfo"))?;
    let mem_free = free.ok_or_else(|| ParseError::new("MemFree missing from meminfo"))?;

    Ok(MemInfo {
        mem_total,
        mem_free,
        mem_available: available.unwrap_or(mem_free),
    })
}

// ============ Routing Table Parser ============

/// Route flag: route is usable.
pub const RTF_UP: u32 = 0x0001;
/// Route flag: destination is reached through a gateway.
pub const RTF_GATEWAY: u32 = 0x0002;

/// One row of `/proc/net/route`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub interface: String,
    pub destination: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub flags: u32,
    pub mask: Ipv4Addr,
}

impl RouteEntry {
    pub fn is_default(&self) -> bool {
        self.flags & RTF_UP != 0
            && self.destination == Ipv4Addr::UNSPECIFIED
            && self.mask == Ipv4Addr::UNSPECIFIED
    }
}

/// Decodes an address as the kernel prints it in `/proc/net/route`:
/// eight hex digits of a network-order `u32` read as host (little) endian.
fn parse_route_addr(field: &str) -> Result<Ipv4Addr, ParseError> {
    let raw = u32::from_str_radix(field, 16)
        .map_err(|_| ParseError::new(format!("bad route address: {:?}", field)))?;
    Ok(Ipv4Addr::from(raw.to_le_bytes()))
}

/// Parses `/proc/net/route` content.
///
/// Format:
/// Iface   Destination Gateway  Flags RefCnt Use Metric Mask     MTU Window IRTT
/// eth0    00000000    0101A8C0 0003  0      0   100    00000000 0   0      0
pub fn parse_net_route(content: &str) -> Result<Vec<RouteEntry>, ParseError> {
    let mut routes = Vec::new();

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 8 {
            return Err(ParseError::new(format!("short route line: {:?}", line)));
        }

        let flags = u32::from_str_radix(fields[3], 16)
            .map_err(|_| ParseError::new(format!("bad route flags: {:?}", fields[3])))?;

        routes.push(RouteEntry {
            interface: fields[0].to_string(),
            destination: parse_route_addr(fields[1])?,
            gateway: parse_route_addr(fields[2])?,
            flags,
            mask: parse_route_addr(fields[7])?,
        });
    }

    Ok(routes)
}

// ============ ARP Table Parser ============

/// ARP flag: entry is complete (hardware address resolved).
pub const ATF_COM: u32 = 0x02;

/// One row of `/proc/net/arp`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArpEntry {
    pub address: Ipv4Addr,
    pub flags: u32,
    pub hw_address: String,
    pub device: String,
}

impl ArpEntry {
    pub fn is_complete(&self) -> bool {
        self.flags & ATF_COM != 0
    }
}

/// Parses `/proc/net/arp` content.
///
/// Format:
/// IP address       HW type     Flags       HW address            Mask     Device
/// 192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
pub fn parse_net_arp(content: &str) -> Result<Vec<ArpEntry>, ParseError> {
    let mut entries = Vec::new();

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 6 {
            return Err(ParseError::new(format!("short arp line: {:?}", line)));
        }

        let address = fields[0]
            .parse()
            .map_err(|_| ParseError::new(format!("bad arp address: {:?}", fields[0])))?;
        let flags = u32::from_str_radix(fields[2].trim_start_matches("0x"), 16)
            .map_err(|_| ParseError::new(format!("bad arp flags: {:?}", fields[2])))?;

        entries.push(ArpEntry {
            address,
            flags,
            hw_address: fields[3].to_string(),
            device: fields[5].to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_net_dev_line() {
        let line = "  eth0: 5000 40 1 2 3 4 5 6 3000 30 7 8 9 10 11 12";
        let record = parse_net_dev_line(line).unwrap().unwrap();

        assert_eq!(record.interface, "eth0");
        assert_eq!(
            record.counters,
            [5000, 40, 1, 2, 3, 4, 5, 6, 3000, 30, 7, 8, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_parse_net_dev_line_no_space_after_colon() {
        let record = parse_net_dev_line("wlan0:1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16")
            .unwrap()
            .unwrap();
        assert_eq!(record.interface, "wlan0");
        assert_eq!(record.counters[15], 16);
    }

    #[test]
    fn test_parse_net_dev_line_headers_skipped() {
        assert_eq!(
            parse_net_dev_line("Inter-|   Receive                |  Transmit").unwrap(),
            None
        );
        assert_eq!(
            parse_net_dev_line(" face |bytes    packets errs drop fifo frame compressed multicast|bytes")
                .unwrap(),
            None
        );
        assert_eq!(parse_net_dev_line("").unwrap(), None);
    }

    #[test]
    fn test_parse_net_dev_line_short_record() {
        let err = parse_net_dev_line("eth1: 1 2 3").unwrap_err();
        assert_eq!(
            err,
            ParseError::ShortRecord {
                line: "eth1: 1 2 3".to_string(),
                parsed: 3,
            }
        );
        assert!(err.to_string().contains("only read 3 of 16"));
    }

    #[test]
    fn test_parse_net_dev_line_stops_at_bad_token() {
        let err = parse_net_dev_line("eth0: 1 2 x 4 5 6 7 8 9 10 11 12 13 14 15 16").unwrap_err();
        assert!(matches!(err, ParseError::ShortRecord { parsed: 2, .. }));

        let err = parse_net_dev_line("eth0: -1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16").unwrap_err();
        assert!(matches!(err, ParseError::ShortRecord { parsed: 0, .. }));
    }

    #[test]
    fn test_parse_net_dev_line_extra_columns_ignored() {
        let record = parse_net_dev_line("eth0: 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 junk")
            .unwrap()
            .unwrap();
        assert_eq!(record.counters[15], 16);
    }

    #[test]
    fn test_parse_net_dev_line_max_values() {
        let line = format!("big: {}", vec![u64::MAX.to_string(); 16].join(" "));
        let record = parse_net_dev_line(&line).unwrap().unwrap();
        assert!(record.counters.iter().all(|&v| v == u64::MAX));
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
";
        let info = parse_meminfo(content).unwrap();
        assert_eq!(info.mem_total, 16384000);
        assert_eq!(info.mem_free, 8192000);
        assert_eq!(info.mem_available, 12000000);
    }

    #[test]
    fn test_parse_meminfo_without_available() {
        let info = parse_meminfo("MemTotal: 1000 kB\nMemFree: 400 kB\n").unwrap();
        assert_eq!(info.mem_available, 400);
    }

    #[test]
    fn test_parse_meminfo_errors() {
        assert!(parse_meminfo("MemFree: 400 kB\n").is_err());
        assert!(parse_meminfo("MemTotal: lots kB\nMemFree: 1 kB\n").is_err());
    }

    #[test]
    fn test_parse_net_route() {
        let content = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t00000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
";
        let routes = parse_net_route(content).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].gateway, Ipv4Addr::new(192, 168, 1, 1));
        assert!(routes[0].is_default());
        assert_eq!(routes[0].flags, RTF_UP | RTF_GATEWAY);
        assert_eq!(routes[1].destination, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(routes[1].mask, Ipv4Addr::new(255, 255, 255, 0));
        assert!(!routes[1].is_default());
    }

    #[test]
    fn test_parse_net_route_bad_hex() {
        let content = "Iface\tDestination\tGateway\n\
                       eth0\tZZ000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0\n";
        assert!(parse_net_route(content).is_err());
    }

    #[test]
    fn test_parse_net_arp() {
        let content = "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
192.168.1.20     0x1         0x0         00:00:00:00:00:00     *        eth0
";
        let entries = parse_net_arp(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].address, Ipv4Addr::new(192, 168, 1, 1));
        assert!(entries[0].is_complete());
        assert_eq!(entries[0].device, "eth0");
        assert!(!entries[1].is_complete());
    }
}
