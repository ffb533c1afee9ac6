//! Static lookup tables for PS4 (Orbis) system update packages.
//!
//! File names follow the revision 3 layout. Older packages used a revision 2
//! table that assigns different names to some of the same ids; it is not
//! merged in here.
use std::collections::HashMap;

pub const UNKNOWN: &str = "Unknown";

lazy_static::lazy_static! {
    static ref FILE_NAMES: HashMap<u64, &'static str> = HashMap::from([
        (0x1, "emc_ipl.slb"),
        (0x2, "eap_kbl.slb"),
        (0x3, "torus2_fw.slb"),
        (0x4, "sam_ipl.slb"),
        (0x5, "coreos.slb"),
        (0x6, "system_exfat.img"),
        (0x7, "eap_kernel.slb"),
        (0x8, "eap_vsh_fat16.img"),
        (0x9, "preinst_fat32.img"),
        (0xB, "preinst2_fat32.img"),
        (0xC, "system_ex_exfat.img"),
        (0xD, "emc_ipl.slb"),
        (0xE, "eap_kbl.slb"),
        (0x20, "emc_ipl.slb"),
        (0x21, "eap_kbl.slb"),
        (0x22, "torus2_fw.slb"),
        (0x23, "sam_ipl.slb"),
        (0x24, "emc_ipl.slb"),
        (0x25, "eap_kbl.slb"),
        (0x26, "sam_ipl.slb"),
        (0x27, "sam_ipl.slb"),
        (0x28, "emc_ipl.slb"),
        (0x2A, "emc_ipl.slb"),
        (0x2B, "eap_kbl.slb"),
        (0x2C, "emc_ipl.slb"),
        (0x2D, "sam_ipl.slb"),
        (0x2E, "emc_ipl.slb"),
        (0x30, "torus2_fw.bin"),
        (0x31, "sam_ipl.slb"),
        (0x32, "sam_ipl.slb"),
        (0x101, "eula.xml"),
        (0x200, "orbis_swu.elf"),
        (0x202, "orbis_swu.self"),
        (0xD01, "bd_firm.slb"),
        (0xD02, "sata_bridge_fw.slb"),
        (0xD09, "cp_fw_kernel.slb"),
        (0xD0A, "cp_fw_kernel.slb"),
        (0xD0B, "cp_fw_kernel.slb"),
        (0xD0C, "cp_fw_kernel.slb"),
    ]);

    static ref DEVICE_PATHS: HashMap<u64, &'static str> = HashMap::from([
        (0x1, "/dev/sflash0s0x32b"),
        (0x2, "/dev/sflash0s0x33"),
        (0x3, "/dev/sflash0s0x38"),
        (0x4, "/dev/sflash0s1.cryptx2b"),
        (0x5, "/dev/sflash0s1.cryptx3b"),
        (0x6, "/dev/da0x0.crypt"),
        (0x7, "/dev/da0x1.crypt"),
        (0x8, "/dev/da0x2"),
        (0x9, "/dev/da0x3.crypt"),
        (0xA, "/dev/da0x4.crypt"),
        (0xB, "/dev/da0x4b.crypt"),
        (0xC, "/dev/da0x5.crypt"),
        (0xD, "/dev/sflash0s0x32b"),
        (0xE, "/dev/sflash0s0x33"),
        (0xF, "/dev/sflash0s1.cryptx40"),
        (0x10, "/dev/da0x6x0"),
        (0x11, "/dev/da0x6x1"),
        (0x12, "/dev/da0x6x2.crypt"),
        (0x13, "/dev/da0x15"),
        (0x14, "/dev/da0x16.crypt"),
        (0x15, "/dev/sbram0"),
        (0x16, "/dev/sbram1"),
        (0x17, "/dev/cd0"),
        (0x18, "/dev/md0"),
        (0x19, "/dev/md1"),
        (0x1A, "/dev/usb0"),
        (0x1B, "/dev/usb1"),
        (0x20, "/dev/sflash0s0x32b"),
        (0x21, "/dev/sflash0s0x33"),
        (0x22, "/dev/sflash0s0x38"),
        (0x23, "/dev/sflash0s0x34"),
        (0x24, "/dev/sflash0s0x32b"),
        (0x25, "/dev/sflash0s0x33"),
        (0x26, "/dev/sflash0s0x34"),
        (0x30, "/dev/sflash0s0x38"),
        (0xD01, "/dev/bd_firm"),
        (0xD02, "/dev/sata_bridge_fw"),
        (0xD09, "/dev/cp_fw"),
        (0xE01, "/dev/wlanbt"),
        (0xF01, "/dev/icc_fw"),
    ]);
}

/// Human-readable name of a blob, `"Unknown"` for ids missing from the table.
pub fn file_name(entry_id: u64) -> &'static str {
    FILE_NAMES.get(&entry_id).copied().unwrap_or(UNKNOWN)
}

/// Install target of a blob, `"Unknown"` for ids missing from the table.
pub fn device_path(device_id: u64) -> &'static str {
    DEVICE_PATHS.get(&device_id).copied().unwrap_or(UNKNOWN)
}
