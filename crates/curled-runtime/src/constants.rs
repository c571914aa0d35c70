//! Symbolic constants from `<curl/curl.h>`
//!
//! Values follow the libcurl 7.x ABI. Option codes encode their argument
//! kind in the thousands (`CURLOPTTYPE_*`), info codes in the high bits
//! (`CURLINFO_*` type masks). Each selector section also exports a name
//! table listing every selector the header defines, whether or not the
//! bindings support it.

#![allow(missing_docs)]

/// Declares a group of selector constants plus a `(name, value)` table.
macro_rules! selectors {
    ($(#[$meta:meta])* $table:ident { $($name:ident = $value:expr,)* }) => {
        $(pub const $name: i32 = $value;)*

        $(#[$meta])*
        pub static $table: &[(&str, i32)] = &[$((stringify!($name), $name)),*];
    };
}

// --- Return codes from curl_easy_* functions ---------------------------

selectors! {
    /// Every `CURLcode` known to the header
    CODE_NAMES {
        CURLE_OK = 0,
        CURLE_UNSUPPORTED_PROTOCOL = 1,
        CURLE_FAILED_INIT = 2,
        CURLE_URL_MALFORMAT = 3,
        CURLE_NOT_BUILT_IN = 4,
        CURLE_COULDNT_RESOLVE_PROXY = 5,
        CURLE_COULDNT_RESOLVE_HOST = 6,
        CURLE_COULDNT_CONNECT = 7,
        CURLE_WEIRD_SERVER_REPLY = 8,
        CURLE_REMOTE_ACCESS_DENIED = 9,
        CURLE_FTP_WEIRD_PASS_REPLY = 11,
        CURLE_FTP_WEIRD_PASV_REPLY = 13,
        CURLE_FTP_WEIRD_227_FORMAT = 14,
        CURLE_FTP_CANT_GET_HOST = 15,
        CURLE_FTP_COULDNT_SET_TYPE = 17,
        CURLE_PARTIAL_FILE = 18,
        CURLE_FTP_COULDNT_RETR_FILE = 19,
        CURLE_QUOTE_ERROR = 21,
        CURLE_HTTP_RETURNED_ERROR = 22,
        CURLE_WRITE_ERROR = 23,
        CURLE_UPLOAD_FAILED = 25,
        CURLE_READ_ERROR = 26,
        CURLE_OUT_OF_MEMORY = 27,
        CURLE_OPERATION_TIMEDOUT = 28,
        CURLE_FTP_PORT_FAILED = 30,
        CURLE_FTP_COULDNT_USE_REST = 31,
        CURLE_RANGE_ERROR = 33,
        CURLE_HTTP_POST_ERROR = 34,
        CURLE_SSL_CONNECT_ERROR = 35,
        CURLE_BAD_DOWNLOAD_RESUME = 36,
        CURLE_FILE_COULDNT_READ_FILE = 37,
        CURLE_LDAP_CANNOT_BIND = 38,
        CURLE_LDAP_SEARCH_FAILED = 39,
        CURLE_FUNCTION_NOT_FOUND = 41,
        CURLE_ABORTED_BY_CALLBACK = 42,
        CURLE_BAD_FUNCTION_ARGUMENT = 43,
        CURLE_INTERFACE_FAILED = 45,
        CURLE_TOO_MANY_REDIRECTS = 47,
        CURLE_UNKNOWN_OPTION = 48,
        CURLE_TELNET_OPTION_SYNTAX = 49,
        CURLE_GOT_NOTHING = 52,
        CURLE_SSL_ENGINE_NOTFOUND = 53,
        CURLE_SSL_ENGINE_SETFAILED = 54,
        CURLE_SEND_ERROR = 55,
        CURLE_RECV_ERROR = 56,
        CURLE_SSL_CERTPROBLEM = 58,
        CURLE_SSL_CIPHER = 59,
        CURLE_PEER_FAILED_VERIFICATION = 60,
        CURLE_BAD_CONTENT_ENCODING = 61,
        CURLE_FILESIZE_EXCEEDED = 63,
        CURLE_USE_SSL_FAILED = 64,
        CURLE_SEND_FAIL_REWIND = 65,
        CURLE_SSL_ENGINE_INITFAILED = 66,
        CURLE_LOGIN_DENIED = 67,
        CURLE_TFTP_NOTFOUND = 68,
        CURLE_TFTP_PERM = 69,
        CURLE_REMOTE_DISK_FULL = 70,
        CURLE_TFTP_ILLEGAL = 71,
        CURLE_TFTP_UNKNOWNID = 72,
        CURLE_REMOTE_FILE_EXISTS = 73,
        CURLE_TFTP_NOSUCHUSER = 74,
        CURLE_SSL_CACERT_BADFILE = 77,
        CURLE_REMOTE_FILE_NOT_FOUND = 78,
        CURLE_SSH = 79,
        CURLE_SSL_SHUTDOWN_FAILED = 80,
        CURLE_AGAIN = 81,
        CURLE_SSL_CRL_BADFILE = 82,
        CURLE_SSL_ISSUER_ERROR = 83,
    }
}

// --- Option type codes -------------------------------------------------

pub const CURLOPTTYPE_LONG: i32 = 0;
pub const CURLOPTTYPE_OBJECTPOINT: i32 = 10000;
pub const CURLOPTTYPE_FUNCTIONPOINT: i32 = 20000;
pub const CURLOPTTYPE_OFF_T: i32 = 30000;

// --- Option codes for curl_easy_setopt() -------------------------------

selectors! {
    /// Every `CURLoption` known to the header
    OPTION_NAMES {
        CURLOPT_WRITEDATA = CURLOPTTYPE_OBJECTPOINT + 1,
        CURLOPT_URL = CURLOPTTYPE_OBJECTPOINT + 2,
        CURLOPT_PORT = CURLOPTTYPE_LONG + 3,
        CURLOPT_PROXY = CURLOPTTYPE_OBJECTPOINT + 4,
        CURLOPT_USERPWD = CURLOPTTYPE_OBJECTPOINT + 5,
        CURLOPT_PROXYUSERPWD = CURLOPTTYPE_OBJECTPOINT + 6,
        CURLOPT_RANGE = CURLOPTTYPE_OBJECTPOINT + 7,
        CURLOPT_READDATA = CURLOPTTYPE_OBJECTPOINT + 9,
        CURLOPT_ERRORBUFFER = CURLOPTTYPE_OBJECTPOINT + 10,
        CURLOPT_WRITEFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 11,
        CURLOPT_READFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 12,
        CURLOPT_TIMEOUT = CURLOPTTYPE_LONG + 13,
        CURLOPT_INFILESIZE = CURLOPTTYPE_LONG + 14,
        CURLOPT_POSTFIELDS = CURLOPTTYPE_OBJECTPOINT + 15,
        CURLOPT_REFERER = CURLOPTTYPE_OBJECTPOINT + 16,
        CURLOPT_FTPPORT = CURLOPTTYPE_OBJECTPOINT + 17,
        CURLOPT_USERAGENT = CURLOPTTYPE_OBJECTPOINT + 18,
        CURLOPT_LOW_SPEED_LIMIT = CURLOPTTYPE_LONG + 19,
        CURLOPT_LOW_SPEED_TIME = CURLOPTTYPE_LONG + 20,
        CURLOPT_RESUME_FROM = CURLOPTTYPE_LONG + 21,
        CURLOPT_COOKIE = CURLOPTTYPE_OBJECTPOINT + 22,
        CURLOPT_HTTPHEADER = CURLOPTTYPE_OBJECTPOINT + 23,
        CURLOPT_HTTPPOST = CURLOPTTYPE_OBJECTPOINT + 24,
        CURLOPT_SSLCERT = CURLOPTTYPE_OBJECTPOINT + 25,
        CURLOPT_KEYPASSWD = CURLOPTTYPE_OBJECTPOINT + 26,
        CURLOPT_CRLF = CURLOPTTYPE_LONG + 27,
        CURLOPT_QUOTE = CURLOPTTYPE_OBJECTPOINT + 28,
        CURLOPT_HEADERDATA = CURLOPTTYPE_OBJECTPOINT + 29,
        CURLOPT_COOKIEFILE = CURLOPTTYPE_OBJECTPOINT + 31,
        CURLOPT_SSLVERSION = CURLOPTTYPE_LONG + 32,
        CURLOPT_TIMECONDITION = CURLOPTTYPE_LONG + 33,
        CURLOPT_TIMEVALUE = CURLOPTTYPE_LONG + 34,
        CURLOPT_CUSTOMREQUEST = CURLOPTTYPE_OBJECTPOINT + 36,
        CURLOPT_STDERR = CURLOPTTYPE_OBJECTPOINT + 37,
        CURLOPT_POSTQUOTE = CURLOPTTYPE_OBJECTPOINT + 39,
        CURLOPT_VERBOSE = CURLOPTTYPE_LONG + 41,
        CURLOPT_HEADER = CURLOPTTYPE_LONG + 42,
        CURLOPT_NOPROGRESS = CURLOPTTYPE_LONG + 43,
        CURLOPT_NOBODY = CURLOPTTYPE_LONG + 44,
        CURLOPT_FAILONERROR = CURLOPTTYPE_LONG + 45,
        CURLOPT_UPLOAD = CURLOPTTYPE_LONG + 46,
        CURLOPT_POST = CURLOPTTYPE_LONG + 47,
        CURLOPT_DIRLISTONLY = CURLOPTTYPE_LONG + 48,
        CURLOPT_APPEND = CURLOPTTYPE_LONG + 50,
        CURLOPT_NETRC = CURLOPTTYPE_LONG + 51,
        CURLOPT_FOLLOWLOCATION = CURLOPTTYPE_LONG + 52,
        CURLOPT_TRANSFERTEXT = CURLOPTTYPE_LONG + 53,
        CURLOPT_PUT = CURLOPTTYPE_LONG + 54,
        CURLOPT_PROGRESSFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 56,
        CURLOPT_PROGRESSDATA = CURLOPTTYPE_OBJECTPOINT + 57,
        CURLOPT_AUTOREFERER = CURLOPTTYPE_LONG + 58,
        CURLOPT_PROXYPORT = CURLOPTTYPE_LONG + 59,
        CURLOPT_POSTFIELDSIZE = CURLOPTTYPE_LONG + 60,
        CURLOPT_HTTPPROXYTUNNEL = CURLOPTTYPE_LONG + 61,
        CURLOPT_INTERFACE = CURLOPTTYPE_OBJECTPOINT + 62,
        CURLOPT_KRBLEVEL = CURLOPTTYPE_OBJECTPOINT + 63,
        CURLOPT_SSL_VERIFYPEER = CURLOPTTYPE_LONG + 64,
        CURLOPT_CAINFO = CURLOPTTYPE_OBJECTPOINT + 65,
        CURLOPT_MAXREDIRS = CURLOPTTYPE_LONG + 68,
        CURLOPT_FILETIME = CURLOPTTYPE_LONG + 69,
        CURLOPT_TELNETOPTIONS = CURLOPTTYPE_OBJECTPOINT + 70,
        CURLOPT_MAXCONNECTS = CURLOPTTYPE_LONG + 71,
        CURLOPT_FRESH_CONNECT = CURLOPTTYPE_LONG + 74,
        CURLOPT_FORBID_REUSE = CURLOPTTYPE_LONG + 75,
        CURLOPT_RANDOM_FILE = CURLOPTTYPE_OBJECTPOINT + 76,
        CURLOPT_EGDSOCKET = CURLOPTTYPE_OBJECTPOINT + 77,
        CURLOPT_CONNECTTIMEOUT = CURLOPTTYPE_LONG + 78,
        CURLOPT_HEADERFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 79,
        CURLOPT_HTTPGET = CURLOPTTYPE_LONG + 80,
        CURLOPT_SSL_VERIFYHOST = CURLOPTTYPE_LONG + 81,
        CURLOPT_COOKIEJAR = CURLOPTTYPE_OBJECTPOINT + 82,
        CURLOPT_SSL_CIPHER_LIST = CURLOPTTYPE_OBJECTPOINT + 83,
        CURLOPT_HTTP_VERSION = CURLOPTTYPE_LONG + 84,
        CURLOPT_FTP_USE_EPSV = CURLOPTTYPE_LONG + 85,
        CURLOPT_SSLCERTTYPE = CURLOPTTYPE_OBJECTPOINT + 86,
        CURLOPT_SSLKEY = CURLOPTTYPE_OBJECTPOINT + 87,
        CURLOPT_SSLKEYTYPE = CURLOPTTYPE_OBJECTPOINT + 88,
        CURLOPT_SSLENGINE = CURLOPTTYPE_OBJECTPOINT + 89,
        CURLOPT_SSLENGINE_DEFAULT = CURLOPTTYPE_LONG + 90,
        CURLOPT_DNS_USE_GLOBAL_CACHE = CURLOPTTYPE_LONG + 91,
        CURLOPT_DNS_CACHE_TIMEOUT = CURLOPTTYPE_LONG + 92,
        CURLOPT_PREQUOTE = CURLOPTTYPE_OBJECTPOINT + 93,
        CURLOPT_DEBUGFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 94,
        CURLOPT_DEBUGDATA = CURLOPTTYPE_OBJECTPOINT + 95,
        CURLOPT_COOKIESESSION = CURLOPTTYPE_LONG + 96,
        CURLOPT_CAPATH = CURLOPTTYPE_OBJECTPOINT + 97,
        CURLOPT_BUFFERSIZE = CURLOPTTYPE_LONG + 98,
        CURLOPT_NOSIGNAL = CURLOPTTYPE_LONG + 99,
        CURLOPT_SHARE = CURLOPTTYPE_OBJECTPOINT + 100,
        CURLOPT_PROXYTYPE = CURLOPTTYPE_LONG + 101,
        CURLOPT_ENCODING = CURLOPTTYPE_OBJECTPOINT + 102,
        CURLOPT_PRIVATE = CURLOPTTYPE_OBJECTPOINT + 103,
        CURLOPT_HTTP200ALIASES = CURLOPTTYPE_OBJECTPOINT + 104,
        CURLOPT_UNRESTRICTED_AUTH = CURLOPTTYPE_LONG + 105,
        CURLOPT_FTP_USE_EPRT = CURLOPTTYPE_LONG + 106,
        CURLOPT_HTTPAUTH = CURLOPTTYPE_LONG + 107,
        CURLOPT_SSL_CTX_FUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 108,
        CURLOPT_SSL_CTX_DATA = CURLOPTTYPE_OBJECTPOINT + 109,
        CURLOPT_FTP_CREATE_MISSING_DIRS = CURLOPTTYPE_LONG + 110,
        CURLOPT_PROXYAUTH = CURLOPTTYPE_LONG + 111,
        CURLOPT_FTP_RESPONSE_TIMEOUT = CURLOPTTYPE_LONG + 112,
        CURLOPT_IPRESOLVE = CURLOPTTYPE_LONG + 113,
        CURLOPT_MAXFILESIZE = CURLOPTTYPE_LONG + 114,
        CURLOPT_INFILESIZE_LARGE = CURLOPTTYPE_OFF_T + 115,
        CURLOPT_RESUME_FROM_LARGE = CURLOPTTYPE_OFF_T + 116,
        CURLOPT_MAXFILESIZE_LARGE = CURLOPTTYPE_OFF_T + 117,
        CURLOPT_NETRC_FILE = CURLOPTTYPE_OBJECTPOINT + 118,
        CURLOPT_USE_SSL = CURLOPTTYPE_LONG + 119,
        CURLOPT_POSTFIELDSIZE_LARGE = CURLOPTTYPE_OFF_T + 120,
        CURLOPT_TCP_NODELAY = CURLOPTTYPE_LONG + 121,
        CURLOPT_FTPSSLAUTH = CURLOPTTYPE_LONG + 129,
        CURLOPT_IOCTLFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 130,
        CURLOPT_IOCTLDATA = CURLOPTTYPE_OBJECTPOINT + 131,
        CURLOPT_FTP_ACCOUNT = CURLOPTTYPE_OBJECTPOINT + 134,
        CURLOPT_COOKIELIST = CURLOPTTYPE_OBJECTPOINT + 135,
        CURLOPT_IGNORE_CONTENT_LENGTH = CURLOPTTYPE_LONG + 136,
        CURLOPT_FTP_SKIP_PASV_IP = CURLOPTTYPE_LONG + 137,
        CURLOPT_FTP_FILEMETHOD = CURLOPTTYPE_LONG + 138,
        CURLOPT_LOCALPORT = CURLOPTTYPE_LONG + 139,
        CURLOPT_LOCALPORTRANGE = CURLOPTTYPE_LONG + 140,
        CURLOPT_CONNECT_ONLY = CURLOPTTYPE_LONG + 141,
        CURLOPT_MAX_SEND_SPEED_LARGE = CURLOPTTYPE_OFF_T + 145,
        CURLOPT_MAX_RECV_SPEED_LARGE = CURLOPTTYPE_OFF_T + 146,
        CURLOPT_FTP_ALTERNATIVE_TO_USER = CURLOPTTYPE_OBJECTPOINT + 147,
        CURLOPT_SOCKOPTFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 148,
        CURLOPT_SOCKOPTDATA = CURLOPTTYPE_OBJECTPOINT + 149,
        CURLOPT_SSL_SESSIONID_CACHE = CURLOPTTYPE_LONG + 150,
        CURLOPT_SSH_AUTH_TYPES = CURLOPTTYPE_LONG + 151,
        CURLOPT_SSH_PUBLIC_KEYFILE = CURLOPTTYPE_OBJECTPOINT + 152,
        CURLOPT_SSH_PRIVATE_KEYFILE = CURLOPTTYPE_OBJECTPOINT + 153,
        CURLOPT_FTP_SSL_CCC = CURLOPTTYPE_LONG + 154,
        CURLOPT_TIMEOUT_MS = CURLOPTTYPE_LONG + 155,
        CURLOPT_CONNECTTIMEOUT_MS = CURLOPTTYPE_LONG + 156,
        CURLOPT_HTTP_TRANSFER_DECODING = CURLOPTTYPE_LONG + 157,
        CURLOPT_HTTP_CONTENT_DECODING = CURLOPTTYPE_LONG + 158,
        CURLOPT_NEW_FILE_PERMS = CURLOPTTYPE_LONG + 159,
        CURLOPT_NEW_DIRECTORY_PERMS = CURLOPTTYPE_LONG + 160,
        CURLOPT_POSTREDIR = CURLOPTTYPE_LONG + 161,
        CURLOPT_SSH_HOST_PUBLIC_KEY_MD5 = CURLOPTTYPE_OBJECTPOINT + 162,
        CURLOPT_OPENSOCKETFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 163,
        CURLOPT_OPENSOCKETDATA = CURLOPTTYPE_OBJECTPOINT + 164,
        CURLOPT_COPYPOSTFIELDS = CURLOPTTYPE_OBJECTPOINT + 165,
        CURLOPT_PROXY_TRANSFER_MODE = CURLOPTTYPE_LONG + 166,
        CURLOPT_SEEKFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 167,
        CURLOPT_SEEKDATA = CURLOPTTYPE_OBJECTPOINT + 168,
        CURLOPT_CRLFILE = CURLOPTTYPE_OBJECTPOINT + 169,
        CURLOPT_ISSUERCERT = CURLOPTTYPE_OBJECTPOINT + 170,
        CURLOPT_ADDRESS_SCOPE = CURLOPTTYPE_LONG + 171,
        CURLOPT_CERTINFO = CURLOPTTYPE_LONG + 172,
        CURLOPT_USERNAME = CURLOPTTYPE_OBJECTPOINT + 173,
        CURLOPT_PASSWORD = CURLOPTTYPE_OBJECTPOINT + 174,
        CURLOPT_PROXYUSERNAME = CURLOPTTYPE_OBJECTPOINT + 175,
        CURLOPT_PROXYPASSWORD = CURLOPTTYPE_OBJECTPOINT + 176,
        CURLOPT_NOPROXY = CURLOPTTYPE_OBJECTPOINT + 177,
        CURLOPT_TFTP_BLKSIZE = CURLOPTTYPE_LONG + 178,
        CURLOPT_SOCKS5_GSSAPI_SERVICE = CURLOPTTYPE_OBJECTPOINT + 179,
        CURLOPT_SOCKS5_GSSAPI_NEC = CURLOPTTYPE_LONG + 180,
        CURLOPT_PROTOCOLS = CURLOPTTYPE_LONG + 181,
        CURLOPT_REDIR_PROTOCOLS = CURLOPTTYPE_LONG + 182,
        CURLOPT_SSH_KNOWNHOSTS = CURLOPTTYPE_OBJECTPOINT + 183,
        CURLOPT_SSH_KEYFUNCTION = CURLOPTTYPE_FUNCTIONPOINT + 184,
        CURLOPT_SSH_KEYDATA = CURLOPTTYPE_OBJECTPOINT + 185,
    }
}

/// Old name of `CURLOPT_WRITEDATA`
pub const CURLOPT_FILE: i32 = CURLOPT_WRITEDATA;
/// Old name of `CURLOPT_READDATA`
pub const CURLOPT_INFILE: i32 = CURLOPT_READDATA;
/// Old name of `CURLOPT_HEADERDATA`
pub const CURLOPT_WRITEHEADER: i32 = CURLOPT_HEADERDATA;

// --- Selector codes for curl_easy_getinfo() ----------------------------

pub const CURLINFO_STRING: i32 = 0x100000;
pub const CURLINFO_LONG: i32 = 0x200000;
pub const CURLINFO_DOUBLE: i32 = 0x300000;
pub const CURLINFO_SLIST: i32 = 0x400000;
pub const CURLINFO_MASK: i32 = 0x0fffff;
pub const CURLINFO_TYPEMASK: i32 = 0xf00000;

selectors! {
    /// Every `CURLINFO` selector known to the header
    INFO_NAMES {
        CURLINFO_EFFECTIVE_URL = CURLINFO_STRING + 1,
        CURLINFO_RESPONSE_CODE = CURLINFO_LONG + 2,
        CURLINFO_TOTAL_TIME = CURLINFO_DOUBLE + 3,
        CURLINFO_NAMELOOKUP_TIME = CURLINFO_DOUBLE + 4,
        CURLINFO_CONNECT_TIME = CURLINFO_DOUBLE + 5,
        CURLINFO_PRETRANSFER_TIME = CURLINFO_DOUBLE + 6,
        CURLINFO_SIZE_UPLOAD = CURLINFO_DOUBLE + 7,
        CURLINFO_SIZE_DOWNLOAD = CURLINFO_DOUBLE + 8,
        CURLINFO_SPEED_DOWNLOAD = CURLINFO_DOUBLE + 9,
        CURLINFO_SPEED_UPLOAD = CURLINFO_DOUBLE + 10,
        CURLINFO_HEADER_SIZE = CURLINFO_LONG + 11,
        CURLINFO_REQUEST_SIZE = CURLINFO_LONG + 12,
        CURLINFO_SSL_VERIFYRESULT = CURLINFO_LONG + 13,
        CURLINFO_FILETIME = CURLINFO_LONG + 14,
        CURLINFO_CONTENT_LENGTH_DOWNLOAD = CURLINFO_DOUBLE + 15,
        CURLINFO_CONTENT_LENGTH_UPLOAD = CURLINFO_DOUBLE + 16,
        CURLINFO_STARTTRANSFER_TIME = CURLINFO_DOUBLE + 17,
        CURLINFO_CONTENT_TYPE = CURLINFO_STRING + 18,
        CURLINFO_REDIRECT_TIME = CURLINFO_DOUBLE + 19,
        CURLINFO_REDIRECT_COUNT = CURLINFO_LONG + 20,
        CURLINFO_PRIVATE = CURLINFO_STRING + 21,
        CURLINFO_HTTP_CONNECTCODE = CURLINFO_LONG + 22,
        CURLINFO_HTTPAUTH_AVAIL = CURLINFO_LONG + 23,
        CURLINFO_PROXYAUTH_AVAIL = CURLINFO_LONG + 24,
        CURLINFO_OS_ERRNO = CURLINFO_LONG + 25,
        CURLINFO_NUM_CONNECTS = CURLINFO_LONG + 26,
        CURLINFO_SSL_ENGINES = CURLINFO_SLIST + 27,
        CURLINFO_COOKIELIST = CURLINFO_SLIST + 28,
        CURLINFO_LASTSOCKET = CURLINFO_LONG + 29,
        CURLINFO_FTP_ENTRY_PATH = CURLINFO_STRING + 30,
        CURLINFO_REDIRECT_URL = CURLINFO_STRING + 31,
        CURLINFO_PRIMARY_IP = CURLINFO_STRING + 32,
        CURLINFO_APPCONNECT_TIME = CURLINFO_DOUBLE + 33,
        CURLINFO_CERTINFO = CURLINFO_SLIST + 34,
        CURLINFO_CONDITION_UNMET = CURLINFO_LONG + 35,
    }
}

// --- Callback return values --------------------------------------------

pub const CURL_READFUNC_ABORT: usize = 0x1000_0000;
pub const CURL_READFUNC_PAUSE: usize = 0x1000_0001;
pub const CURL_WRITEFUNC_PAUSE: usize = 0x1000_0001;

// --- Flags for curl_global_init() --------------------------------------

pub const CURL_GLOBAL_SSL: i64 = 1 << 0;
pub const CURL_GLOBAL_WIN32: i64 = 1 << 1;
pub const CURL_GLOBAL_ALL: i64 = CURL_GLOBAL_SSL | CURL_GLOBAL_WIN32;
pub const CURL_GLOBAL_NOTHING: i64 = 0;
pub const CURL_GLOBAL_DEFAULT: i64 = CURL_GLOBAL_ALL;

// --- Version selectors for curl_version_info() -------------------------

pub const CURLVERSION_FIRST: i32 = 0;
pub const CURLVERSION_SECOND: i32 = 1;
pub const CURLVERSION_THIRD: i32 = 2;
pub const CURLVERSION_FOURTH: i32 = 3;

// --- Bit masks for curl_version_info_data->features --------------------

pub const CURL_VERSION_IPV6: i32 = 1 << 0;
pub const CURL_VERSION_KERBEROS4: i32 = 1 << 1;
pub const CURL_VERSION_SSL: i32 = 1 << 2;
pub const CURL_VERSION_LIBZ: i32 = 1 << 3;
pub const CURL_VERSION_NTLM: i32 = 1 << 4;
pub const CURL_VERSION_GSSNEGOTIATE: i32 = 1 << 5;
pub const CURL_VERSION_DEBUG: i32 = 1 << 6;
pub const CURL_VERSION_ASYNCHDNS: i32 = 1 << 7;
pub const CURL_VERSION_SPNEGO: i32 = 1 << 8;
pub const CURL_VERSION_LARGEFILE: i32 = 1 << 9;
pub const CURL_VERSION_IDN: i32 = 1 << 10;
pub const CURL_VERSION_SSPI: i32 = 1 << 11;
pub const CURL_VERSION_CONV: i32 = 1 << 12;
pub const CURL_VERSION_CURLDEBUG: i32 = 1 << 13;

// --- Option bitmasks for CURLOPT_PROTOCOLS and CURLOPT_REDIR_PROTOCOLS -

pub const CURLPROTO_HTTP: i64 = 1 << 0;
pub const CURLPROTO_HTTPS: i64 = 1 << 1;
pub const CURLPROTO_FTP: i64 = 1 << 2;
pub const CURLPROTO_FTPS: i64 = 1 << 3;
pub const CURLPROTO_SCP: i64 = 1 << 4;
pub const CURLPROTO_SFTP: i64 = 1 << 5;
pub const CURLPROTO_TELNET: i64 = 1 << 6;
pub const CURLPROTO_LDAP: i64 = 1 << 7;
pub const CURLPROTO_LDAPS: i64 = 1 << 8;
pub const CURLPROTO_DICT: i64 = 1 << 9;
pub const CURLPROTO_FILE: i64 = 1 << 10;
pub const CURLPROTO_TFTP: i64 = 1 << 11;
pub const CURLPROTO_ALL: i64 = !0;

// --- Option bitmasks for CURLOPT_HTTPAUTH and CURLOPT_PROXYAUTH --------

pub const CURLAUTH_NONE: i64 = 0;
pub const CURLAUTH_BASIC: i64 = 1 << 0;
pub const CURLAUTH_DIGEST: i64 = 1 << 1;
pub const CURLAUTH_GSSNEGOTIATE: i64 = 1 << 2;
pub const CURLAUTH_NTLM: i64 = 1 << 3;
pub const CURLAUTH_DIGEST_IE: i64 = 1 << 4;
pub const CURLAUTH_ANY: i64 = !CURLAUTH_DIGEST_IE;
pub const CURLAUTH_ANYSAFE: i64 = !(CURLAUTH_BASIC | CURLAUTH_DIGEST_IE);

// --- Option bitmasks for CURLOPT_SSH_AUTH_TYPES ------------------------

pub const CURLSSH_AUTH_NONE: i64 = 0;
pub const CURLSSH_AUTH_PUBLICKEY: i64 = 1 << 0;
pub const CURLSSH_AUTH_PASSWORD: i64 = 1 << 1;
pub const CURLSSH_AUTH_HOST: i64 = 1 << 2;
pub const CURLSSH_AUTH_KEYBOARD: i64 = 1 << 3;
pub const CURLSSH_AUTH_ANY: i64 = !0;

// --- Option codes for CURLOPT_HTTP_VERSION -----------------------------

pub const CURL_HTTP_VERSION_NONE: i64 = 0;
pub const CURL_HTTP_VERSION_1_0: i64 = 1;
pub const CURL_HTTP_VERSION_1_1: i64 = 2;

// --- Option codes for CURLOPT_PROXYTYPE --------------------------------

pub const CURLPROXY_HTTP: i64 = 0;
pub const CURLPROXY_HTTP_1_0: i64 = 1;
pub const CURLPROXY_SOCKS4: i64 = 4;
pub const CURLPROXY_SOCKS5: i64 = 5;
pub const CURLPROXY_SOCKS4A: i64 = 6;
pub const CURLPROXY_SOCKS5_HOSTNAME: i64 = 7;

// --- Option codes for CURLOPT_IPRESOLVE --------------------------------

pub const CURL_IPRESOLVE_WHATEVER: i64 = 0;
pub const CURL_IPRESOLVE_V4: i64 = 1;
pub const CURL_IPRESOLVE_V6: i64 = 2;

// --- Option codes for CURLOPT_NETRC ------------------------------------

pub const CURL_NETRC_IGNORED: i64 = 0;
pub const CURL_NETRC_OPTIONAL: i64 = 1;
pub const CURL_NETRC_REQUIRED: i64 = 2;

// --- Option codes for CURLOPT_POSTREDIR --------------------------------

pub const CURL_REDIR_GET_ALL: i64 = 0;
pub const CURL_REDIR_POST_301: i64 = 1;
pub const CURL_REDIR_POST_302: i64 = 2;
pub const CURL_REDIR_POST_ALL: i64 = CURL_REDIR_POST_301 | CURL_REDIR_POST_302;

// --- Option codes for CURLOPT_SSLVERSION -------------------------------

pub const CURL_SSLVERSION_DEFAULT: i64 = 0;
pub const CURL_SSLVERSION_TLSV1: i64 = 1;
pub const CURL_SSLVERSION_SSLV2: i64 = 2;
pub const CURL_SSLVERSION_SSLV3: i64 = 3;

// --- Option codes for CURLOPT_TIMECONDITION ----------------------------

pub const CURL_TIMECOND_NONE: i64 = 0;
pub const CURL_TIMECOND_IFMODSINCE: i64 = 1;
pub const CURL_TIMECOND_IFUNMODSINCE: i64 = 2;
pub const CURL_TIMECOND_LASTMOD: i64 = 3;

// --- Option codes for CURLOPT_USE_SSL ----------------------------------

pub const CURLUSESSL_NONE: i64 = 0;
pub const CURLUSESSL_TRY: i64 = 1;
pub const CURLUSESSL_CONTROL: i64 = 2;
pub const CURLUSESSL_ALL: i64 = 3;

// --- Option codes for CURLOPT_FTPSSLAUTH -------------------------------

pub const CURLFTPAUTH_DEFAULT: i64 = 0;
pub const CURLFTPAUTH_SSL: i64 = 1;
pub const CURLFTPAUTH_TLS: i64 = 2;

// --- Option codes for CURLOPT_FTP_SSL_CCC ------------------------------

pub const CURLFTPSSL_CCC_NONE: i64 = 0;
pub const CURLFTPSSL_CCC_PASSIVE: i64 = 1;
pub const CURLFTPSSL_CCC_ACTIVE: i64 = 2;

// --- Option codes for CURLOPT_FTP_CREATE_MISSING_DIRS ------------------

pub const CURLFTP_CREATE_DIR_NONE: i64 = 0;
pub const CURLFTP_CREATE_DIR: i64 = 1;
pub const CURLFTP_CREATE_DIR_RETRY: i64 = 2;

// --- Option codes for CURLOPT_FTP_FILEMETHOD ---------------------------

pub const CURLFTPMETHOD_DEFAULT: i64 = 0;
pub const CURLFTPMETHOD_MULTICWD: i64 = 1;
pub const CURLFTPMETHOD_NOCWD: i64 = 2;
pub const CURLFTPMETHOD_SINGLECWD: i64 = 3;

/// Look up the header name of a return code
pub fn code_name(code: i32) -> Option<&'static str> {
    lookup_name(CODE_NAMES, code)
}

/// Look up the header name of an option selector
pub fn option_name(selector: i32) -> Option<&'static str> {
    lookup_name(OPTION_NAMES, selector)
}

/// Look up the header name of an info selector
pub fn info_name(selector: i32) -> Option<&'static str> {
    lookup_name(INFO_NAMES, selector)
}

fn lookup_name(table: &'static [(&'static str, i32)], value: i32) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(name, _)| *name)
}
