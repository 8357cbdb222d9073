//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states
//! for testing various system conditions.

use super::filesystem::MockFs;

const MEMINFO: &str = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
";

const NET_DEV: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    1     2          3       100 123456789   456789    2    5    4     6       7          8
";

const NET_ROUTE: &str = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t00000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0
eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
";

const NET_ARP: &str = "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
192.168.1.20     0x1         0x0         00:00:00:00:00:00     *        eth0
";

impl MockFs {
    /// Creates a typical host: loopback plus one ethernet interface with a
    /// reachable default gateway at 192.168.1.1.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/meminfo", MEMINFO);
        fs.add_file("/proc/net/dev", NET_DEV);
        fs.add_file("/proc/net/route", NET_ROUTE);
        fs.add_file("/proc/net/arp", NET_ARP);
        fs
    }

    /// Creates a host that is nearly out of memory.
    pub fn memory_pressure() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:           51200 kB
MemAvailable:     102400 kB
Buffers:            1024 kB
Cached:            20480 kB
SwapTotal:       4096000 kB
SwapFree:              0 kB
",
        );
        fs
    }

    /// Creates a host with only a link-local route and an empty neighbour
    /// table.
    pub fn without_default_route() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file(
            "/proc/net/route",
            "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0
",
        );
        fs.add_file(
            "/proc/net/arp",
            "IP address       HW type     Flags       HW address            Mask     Device\n",
        );
        fs
    }

    /// Creates a host whose gateway has no resolved neighbour entry.
    pub fn unreachable_gateway() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file(
            "/proc/net/arp",
            "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.1.1      0x1         0x0         00:00:00:00:00:00     *        eth0
",
        );
        fs
    }
}
