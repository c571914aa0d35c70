//! Selector classification
//!
//! Maps each supported option and info selector to the `TypeClass` its
//! value travels as. Selectors missing from these tables are rejected by the
//! session: as unsupported when the header knows them, as unknown otherwise.

use crate::constants::*;
use crate::ffi::types::TypeClass;

/// Class of an option selector, or `None` if the bindings do not handle it
pub fn classify_option(selector: i32) -> Option<TypeClass> {
    use TypeClass::*;

    let class = match selector {
        // Behavior
        CURLOPT_VERBOSE | CURLOPT_HEADER | CURLOPT_NOPROGRESS | CURLOPT_NOSIGNAL => Bool,

        // Callbacks
        CURLOPT_WRITEFUNCTION | CURLOPT_HEADERFUNCTION => WriteFn,
        CURLOPT_READFUNCTION => ReadFn,

        // Errors
        CURLOPT_FAILONERROR => Bool,

        // Network
        CURLOPT_URL
        | CURLOPT_PROXY
        | CURLOPT_NOPROXY
        | CURLOPT_SOCKS5_GSSAPI_SERVICE
        | CURLOPT_INTERFACE => CString,
        CURLOPT_PROTOCOLS
        | CURLOPT_REDIR_PROTOCOLS
        | CURLOPT_PROXYPORT
        | CURLOPT_PROXYTYPE
        | CURLOPT_LOCALPORT
        | CURLOPT_LOCALPORTRANGE
        | CURLOPT_DNS_CACHE_TIMEOUT
        | CURLOPT_BUFFERSIZE
        | CURLOPT_PORT
        | CURLOPT_ADDRESS_SCOPE => Int,
        CURLOPT_HTTPPROXYTUNNEL
        | CURLOPT_SOCKS5_GSSAPI_NEC
        | CURLOPT_DNS_USE_GLOBAL_CACHE
        | CURLOPT_TCP_NODELAY => Bool,

        // Names and passwords
        CURLOPT_NETRC | CURLOPT_HTTPAUTH | CURLOPT_PROXYAUTH => Int,
        CURLOPT_NETRC_FILE
        | CURLOPT_USERPWD
        | CURLOPT_PROXYUSERPWD
        | CURLOPT_USERNAME
        | CURLOPT_PASSWORD
        | CURLOPT_PROXYUSERNAME
        | CURLOPT_PROXYPASSWORD => CString,

        // HTTP
        CURLOPT_AUTOREFERER
        | CURLOPT_FOLLOWLOCATION
        | CURLOPT_UNRESTRICTED_AUTH
        | CURLOPT_POST
        | CURLOPT_COOKIESESSION
        | CURLOPT_HTTPGET
        | CURLOPT_IGNORE_CONTENT_LENGTH
        | CURLOPT_HTTP_CONTENT_DECODING
        | CURLOPT_HTTP_TRANSFER_DECODING => Bool,
        CURLOPT_MAXREDIRS
        | CURLOPT_POSTREDIR
        | CURLOPT_POSTFIELDSIZE
        | CURLOPT_POSTFIELDSIZE_LARGE
        | CURLOPT_HTTP_VERSION => Int,
        CURLOPT_ENCODING
        | CURLOPT_REFERER
        | CURLOPT_USERAGENT
        | CURLOPT_COOKIE
        | CURLOPT_COOKIEFILE
        | CURLOPT_COOKIEJAR
        | CURLOPT_COOKIELIST => CString,
        CURLOPT_HTTPHEADER | CURLOPT_HTTP200ALIASES => StringList,

        // TFTP
        CURLOPT_TFTP_BLKSIZE => Int,

        // FTP
        CURLOPT_FTPPORT | CURLOPT_FTP_ALTERNATIVE_TO_USER | CURLOPT_FTP_ACCOUNT => CString,
        CURLOPT_QUOTE | CURLOPT_POSTQUOTE | CURLOPT_PREQUOTE => StringList,
        CURLOPT_DIRLISTONLY
        | CURLOPT_APPEND
        | CURLOPT_FTP_USE_EPRT
        | CURLOPT_FTP_USE_EPSV
        | CURLOPT_FTP_SKIP_PASV_IP => Bool,
        CURLOPT_FTP_CREATE_MISSING_DIRS
        | CURLOPT_FTP_RESPONSE_TIMEOUT
        | CURLOPT_USE_SSL
        | CURLOPT_FTPSSLAUTH
        | CURLOPT_FTP_SSL_CCC
        | CURLOPT_FTP_FILEMETHOD => Int,

        // Protocol
        CURLOPT_TRANSFERTEXT
        | CURLOPT_PROXY_TRANSFER_MODE
        | CURLOPT_CRLF
        | CURLOPT_FILETIME
        | CURLOPT_NOBODY
        | CURLOPT_UPLOAD => Bool,
        CURLOPT_RANGE | CURLOPT_CUSTOMREQUEST => CString,
        CURLOPT_RESUME_FROM
        | CURLOPT_RESUME_FROM_LARGE
        | CURLOPT_INFILESIZE
        | CURLOPT_INFILESIZE_LARGE
        | CURLOPT_MAXFILESIZE
        | CURLOPT_MAXFILESIZE_LARGE
        | CURLOPT_TIMECONDITION
        | CURLOPT_TIMEVALUE => Int,

        // Connection
        CURLOPT_TIMEOUT
        | CURLOPT_TIMEOUT_MS
        | CURLOPT_LOW_SPEED_LIMIT
        | CURLOPT_LOW_SPEED_TIME
        | CURLOPT_MAX_SEND_SPEED_LARGE
        | CURLOPT_MAX_RECV_SPEED_LARGE
        | CURLOPT_MAXCONNECTS
        | CURLOPT_CONNECTTIMEOUT
        | CURLOPT_CONNECTTIMEOUT_MS
        | CURLOPT_IPRESOLVE => Int,
        CURLOPT_FRESH_CONNECT | CURLOPT_FORBID_REUSE | CURLOPT_CONNECT_ONLY => Bool,

        // SSL and security
        CURLOPT_SSLCERT
        | CURLOPT_SSLCERTTYPE
        | CURLOPT_SSLKEY
        | CURLOPT_SSLKEYTYPE
        | CURLOPT_KEYPASSWD
        | CURLOPT_SSLENGINE
        | CURLOPT_CAINFO
        | CURLOPT_ISSUERCERT
        | CURLOPT_CAPATH
        | CURLOPT_CRLFILE
        | CURLOPT_RANDOM_FILE
        | CURLOPT_EGDSOCKET
        | CURLOPT_SSL_CIPHER_LIST
        | CURLOPT_KRBLEVEL => CString,
        CURLOPT_SSLVERSION | CURLOPT_SSL_VERIFYHOST => Int,
        CURLOPT_SSL_VERIFYPEER | CURLOPT_CERTINFO | CURLOPT_SSL_SESSIONID_CACHE => Bool,

        // SSH
        CURLOPT_SSH_AUTH_TYPES => Int,
        CURLOPT_SSH_PUBLIC_KEYFILE
        | CURLOPT_SSH_PRIVATE_KEYFILE
        | CURLOPT_SSH_KNOWNHOSTS
        | CURLOPT_SSH_HOST_PUBLIC_KEY_MD5 => CString,

        // Other
        CURLOPT_NEW_FILE_PERMS | CURLOPT_NEW_DIRECTORY_PERMS => Int,

        // Telnet
        CURLOPT_TELNETOPTIONS => StringList,

        _ => return None,
    };
    Some(class)
}

/// Class of an info selector, or `None` if the bindings do not handle it
pub fn classify_info(selector: i32) -> Option<TypeClass> {
    use TypeClass::*;

    let class = match selector {
        CURLINFO_EFFECTIVE_URL
        | CURLINFO_REDIRECT_URL
        | CURLINFO_CONTENT_TYPE
        | CURLINFO_PRIMARY_IP
        | CURLINFO_FTP_ENTRY_PATH => CString,

        CURLINFO_RESPONSE_CODE
        | CURLINFO_HTTP_CONNECTCODE
        | CURLINFO_FILETIME
        | CURLINFO_REDIRECT_COUNT
        | CURLINFO_HEADER_SIZE
        | CURLINFO_REQUEST_SIZE
        | CURLINFO_SSL_VERIFYRESULT
        | CURLINFO_HTTPAUTH_AVAIL
        | CURLINFO_PROXYAUTH_AVAIL
        | CURLINFO_OS_ERRNO
        | CURLINFO_NUM_CONNECTS
        | CURLINFO_LASTSOCKET
        | CURLINFO_CONDITION_UNMET => Int,

        CURLINFO_TOTAL_TIME
        | CURLINFO_NAMELOOKUP_TIME
        | CURLINFO_CONNECT_TIME
        | CURLINFO_APPCONNECT_TIME
        | CURLINFO_PRETRANSFER_TIME
        | CURLINFO_STARTTRANSFER_TIME
        | CURLINFO_REDIRECT_TIME
        | CURLINFO_SIZE_UPLOAD
        | CURLINFO_SIZE_DOWNLOAD
        | CURLINFO_SPEED_DOWNLOAD
        | CURLINFO_SPEED_UPLOAD
        // Declared as double in the header
        | CURLINFO_CONTENT_LENGTH_DOWNLOAD
        | CURLINFO_CONTENT_LENGTH_UPLOAD => Double,

        CURLINFO_SSL_ENGINES | CURLINFO_COOKIELIST => StringList,

        _ => return None,
    };
    Some(class)
}

/// Whether an option selector takes a `curl_off_t` rather than a `long`
pub fn is_off_t_option(selector: i32) -> bool {
    (CURLOPTTYPE_OFF_T..CURLOPTTYPE_OFF_T + 10000).contains(&selector)
}

/// Userdata option libcurl passes back to a callback option's function
pub fn companion_data(selector: i32) -> Option<i32> {
    match selector {
        CURLOPT_WRITEFUNCTION => Some(CURLOPT_WRITEDATA),
        CURLOPT_READFUNCTION => Some(CURLOPT_READDATA),
        CURLOPT_HEADERFUNCTION => Some(CURLOPT_HEADERDATA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CURLOPT_URL, TypeClass::CString)]
    #[case(CURLOPT_FOLLOWLOCATION, TypeClass::Bool)]
    #[case(CURLOPT_MAXREDIRS, TypeClass::Int)]
    #[case(CURLOPT_HTTPHEADER, TypeClass::StringList)]
    #[case(CURLOPT_WRITEFUNCTION, TypeClass::WriteFn)]
    #[case(CURLOPT_HEADERFUNCTION, TypeClass::WriteFn)]
    #[case(CURLOPT_READFUNCTION, TypeClass::ReadFn)]
    #[case(CURLOPT_INFILESIZE_LARGE, TypeClass::Int)]
    fn test_classify_option(#[case] selector: i32, #[case] expected: TypeClass) {
        assert_eq!(classify_option(selector), Some(expected));
    }

    #[rstest]
    #[case(CURLINFO_EFFECTIVE_URL, TypeClass::CString)]
    #[case(CURLINFO_RESPONSE_CODE, TypeClass::Int)]
    #[case(CURLINFO_TOTAL_TIME, TypeClass::Double)]
    #[case(CURLINFO_CONTENT_LENGTH_DOWNLOAD, TypeClass::Double)]
    #[case(CURLINFO_COOKIELIST, TypeClass::StringList)]
    fn test_classify_info(#[case] selector: i32, #[case] expected: TypeClass) {
        assert_eq!(classify_info(selector), Some(expected));
    }

    #[test]
    fn test_header_known_but_unclassified() {
        assert!(option_name(CURLOPT_WRITEDATA).is_some());
        assert_eq!(classify_option(CURLOPT_WRITEDATA), None);
        assert_eq!(classify_option(CURLOPT_PROGRESSFUNCTION), None);
        assert_eq!(classify_info(CURLINFO_PRIVATE), None);
        assert_eq!(classify_info(CURLINFO_CERTINFO), None);
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        assert_eq!(classify_option(CURLINFO_EFFECTIVE_URL), None);
        assert_eq!(classify_info(CURLOPT_URL), None);
    }

    #[test]
    fn test_every_classified_selector_is_in_the_header() {
        for selector in -1..=40_000 {
            if classify_option(selector).is_some() {
                assert!(option_name(selector).is_some(), "option {}", selector);
            }
        }
        for &(name, selector) in INFO_NAMES {
            if let Some(class) = classify_info(selector) {
                assert!(class.has_decoder(), "{}", name);
            }
        }
    }

    #[test]
    fn test_option_classes_have_encoders() {
        for &(name, selector) in OPTION_NAMES {
            if let Some(class) = classify_option(selector) {
                assert!(class.has_encoder(), "{}", name);
            }
        }
    }

    #[test]
    fn test_off_t_options() {
        assert!(is_off_t_option(CURLOPT_RESUME_FROM_LARGE));
        assert!(!is_off_t_option(CURLOPT_RESUME_FROM));
        assert!(!is_off_t_option(CURLOPT_URL));
    }

    #[test]
    fn test_companion_data() {
        assert_eq!(companion_data(CURLOPT_WRITEFUNCTION), Some(CURLOPT_WRITEDATA));
        assert_eq!(companion_data(CURLOPT_HEADERFUNCTION), Some(CURLOPT_HEADERDATA));
        assert_eq!(companion_data(CURLOPT_URL), None);
    }
}
